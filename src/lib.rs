//! QuickBooks Online API client library.
//!
//! A Rust library for creating and reading QuickBooks Online entities
//! using a trait-based architecture where each operation (Create, Get)
//! is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use quickbooks::{Create, Line, PaymentType, Purchase, QuickBooksClient, ReferenceType};
//!
//! #[tokio::main]
//! async fn main() -> quickbooks::Result<()> {
//!     // Create client from environment variables
//!     let client = QuickBooksClient::from_env()?;
//!
//!     let purchase = Purchase::new(PaymentType::Cash, ReferenceType::new("35"))
//!         .with_line(Line::account_expense(42.0, ReferenceType::new("7")));
//!
//!     let created = Purchase::create(&client, &purchase).await?;
//!     println!("Created purchase {:?}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Create`] - POST a new entity and return the server's version
//! - [`Get`] - Read a single entity by id
//!
//! Requests go through an injected [`Transport`]; [`ReqwestTransport`] is
//! the production implementation. Every call is scoped to one realm
//! (company) and pinned to [`MINOR_VERSION`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `QUICKBOOKS_ACCESS_TOKEN` (required) - OAuth 2 access token
//! - `QUICKBOOKS_REALM_ID` (required) - Company (realm) id
//! - `QUICKBOOKS_ENDPOINT` (optional) - Base URL (defaults to `https://quickbooks.api.intuit.com`)

mod client;
mod error;
mod fault;
mod models;
mod resource;
mod traits;
mod transport;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{QuickBooksClient, MINOR_VERSION, PRODUCTION_ENDPOINT, SANDBOX_ENDPOINT};
pub use error::{QuickBooksError, Result};
pub use fault::{parse_failure, Fault, FaultError};
pub use resource::Resource;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};

// Re-export traits
pub use traits::{Create, Get};

// Re-export models
pub use models::{
    AccountBasedExpenseLineDetail, BillableStatus, GlobalTaxCalculation, Line, MetaData,
    PaymentType, Purchase, ReferenceType, ACCOUNT_BASED_EXPENSE_LINE_DETAIL,
};
