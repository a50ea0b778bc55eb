//! Trait definitions for QuickBooks operations.
//!
//! Each entity type implements the traits its endpoint supports.

mod create;
mod get;

pub use create::Create;
pub use get::Get;
