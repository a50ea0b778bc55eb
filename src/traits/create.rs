//! Create trait for posting new entities.

use async_trait::async_trait;

use crate::client::QuickBooksClient;
use crate::error::Result;

/// Create a new entity on the server.
///
/// The server assigns identity, so this is not idempotent: two calls with
/// the same data create two entities.
///
/// # Example
///
/// ```ignore
/// use quickbooks::{QuickBooksClient, Purchase, Create};
///
/// let client = QuickBooksClient::from_env()?;
/// let created = Purchase::create(&client, &purchase).await?;
/// println!("created purchase {:?}", created.id);
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Create the entity and return the server-confirmed version.
    ///
    /// # Arguments
    ///
    /// * `client` - The QuickBooks API client
    /// * `entity` - The entity to create; unset fields are not sent
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is malformed, the request cannot be
    /// sent, the server rejects it, or the response cannot be decoded.
    async fn create(client: &QuickBooksClient, entity: &Self) -> Result<Self>;
}
