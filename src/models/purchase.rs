//! Purchase model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::line::Line;
use super::reference::ReferenceType;
use crate::client::QuickBooksClient;
use crate::error::Result;
use crate::resource::Resource;
use crate::traits::{Create, Get};

/// A QuickBooks purchase (expense, check or credit card charge).
///
/// Every field is optional. Unset fields are left out of the request body
/// entirely, which the server treats differently from an empty value.
/// `id`, `sync_token` and `meta_data` are assigned by the server.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Purchase {
    pub id: Option<String>,

    /// Version counter used for optimistic locking on updates.
    pub sync_token: Option<String>,

    pub doc_number: Option<String>,

    pub total_amt: Option<f64>,

    /// Transaction date (`YYYY-MM-DD`).
    pub txn_date: Option<NaiveDate>,

    pub payment_type: Option<PaymentType>,

    pub payment_method_ref: Option<ReferenceType>,

    /// Vendor, customer or employee the purchase was made from.
    pub entity_ref: Option<ReferenceType>,

    /// Bank or credit card account the purchase was paid from.
    pub account_ref: Option<ReferenceType>,

    pub private_note: Option<String>,

    pub global_tax_calculation: Option<GlobalTaxCalculation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<Line>,

    pub meta_data: Option<MetaData>,
}

/// How a purchase was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Check,
    CreditCard,
}

/// Whether line amounts include tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalTaxCalculation {
    TaxExcluded,
    TaxInclusive,
    NotApplicable,
}

/// Server-maintained timestamps.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetaData {
    pub create_time: Option<DateTime<FixedOffset>>,
    pub last_updated_time: Option<DateTime<FixedOffset>>,
}

impl Purchase {
    /// Start a purchase paid from `account_ref`.
    pub fn new(payment_type: PaymentType, account_ref: ReferenceType) -> Self {
        Self {
            payment_type: Some(payment_type),
            account_ref: Some(account_ref),
            ..Default::default()
        }
    }

    /// Append a line.
    #[must_use]
    pub fn with_line(mut self, line: Line) -> Self {
        self.line.push(line);
        self
    }

    /// Whether the server has assigned this purchase an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Resource for Purchase {
    const ENTITY: &'static str = "Purchase";
    const PATH: &'static str = "purchase";
}

#[async_trait]
impl Create for Purchase {
    #[tracing::instrument(skip(client, entity))]
    async fn create(client: &QuickBooksClient, entity: &Self) -> Result<Self> {
        client.post_entity(entity).await
    }
}

#[async_trait]
impl Get for Purchase {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &QuickBooksClient, id: String) -> Result<Self> {
        client.get_entity(&id).await
    }
}
