//! Get trait for reading single entities.

use async_trait::async_trait;

use crate::client::QuickBooksClient;
use crate::error::Result;

/// Read one entity from `/v3/company/{realm}/{entity}/{id}`.
///
/// # Example
///
/// ```ignore
/// use quickbooks::{QuickBooksClient, Purchase, Get};
///
/// let client = QuickBooksClient::from_env()?;
/// let purchase = Purchase::get(&client, "252".to_string()).await?;
/// println!("{:?} paid {:?}", purchase.payment_type, purchase.total_amt);
/// ```
#[async_trait]
pub trait Get: Sized {
    /// Identifier type (QuickBooks ids are numeric strings).
    type Id;

    /// Fetch the current server version of the entity.
    ///
    /// # Errors
    ///
    /// An unknown id comes back as a `Fault` (code 610); transport and
    /// decode failures are returned as-is.
    async fn get(client: &QuickBooksClient, id: Self::Id) -> Result<Self>;
}
