//! QuickBooks API client.
//!
//! Low-level client that composes entity URLs, sends requests through the
//! injected transport and unwraps response envelopes. Entity-specific
//! operations are implemented via traits on model types.

use std::env;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::error::{QuickBooksError, Result};
use crate::fault::parse_failure;
use crate::resource::{Envelope, Resource};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Production API endpoint.
pub const PRODUCTION_ENDPOINT: &str = "https://quickbooks.api.intuit.com";

/// Sandbox API endpoint.
pub const SANDBOX_ENDPOINT: &str = "https://sandbox-quickbooks.api.intuit.com";

/// API minor version pinned on every request.
pub const MINOR_VERSION: &str = "65";

const JSON: &str = "application/json";

/// Low-level QuickBooks API client.
///
/// Holds the shared transport, the base endpoint and the realm (company) id.
/// Entity-specific operations are implemented via the `Create` and `Get`
/// traits on model types.
///
/// The endpoint is parsed on every call, so a malformed endpoint surfaces
/// as [`QuickBooksError::UrlError`] from the first operation, before any
/// request is sent.
///
/// This struct is cheaply cloneable; clones share the same transport.
///
/// # Example
///
/// ```no_run
/// use quickbooks::{QuickBooksClient, SANDBOX_ENDPOINT};
///
/// # fn example() -> quickbooks::Result<()> {
/// // Create from environment variables
/// let client = QuickBooksClient::from_env()?;
///
/// // Or configure manually
/// let client = QuickBooksClient::with_token("access-token", SANDBOX_ENDPOINT, "123145")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct QuickBooksClient {
    transport: Arc<dyn Transport>,
    endpoint: Arc<str>,
    realm_id: Arc<str>,
}

impl fmt::Debug for QuickBooksClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickBooksClient")
            .field("endpoint", &self.endpoint)
            .field("realm_id", &self.realm_id)
            .finish_non_exhaustive()
    }
}

impl QuickBooksClient {
    /// Create a client from environment variables.
    ///
    /// Uses `QUICKBOOKS_ACCESS_TOKEN` and `QUICKBOOKS_REALM_ID`, and
    /// optionally `QUICKBOOKS_ENDPOINT` (defaults to the production endpoint).
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set.
    pub fn from_env() -> Result<Self> {
        let token = required_var("QUICKBOOKS_ACCESS_TOKEN")?;
        let realm_id = required_var("QUICKBOOKS_REALM_ID")?;
        let endpoint =
            env::var("QUICKBOOKS_ENDPOINT").unwrap_or_else(|_| PRODUCTION_ENDPOINT.to_string());

        Self::with_token(&token, &endpoint, &realm_id)
    }

    /// Create a client that authenticates with a bearer token over `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_token(token: &str, endpoint: &str, realm_id: &str) -> Result<Self> {
        let transport = ReqwestTransport::new(token)?;
        Ok(Self::new(transport, endpoint, realm_id))
    }

    /// Create a client over the given transport.
    pub fn new<T: Transport + 'static>(transport: T, endpoint: &str, realm_id: &str) -> Self {
        Self::from_shared(Arc::new(transport), endpoint, realm_id)
    }

    /// Create a client over a transport shared with other clients.
    pub fn from_shared(transport: Arc<dyn Transport>, endpoint: &str, realm_id: &str) -> Self {
        Self {
            transport,
            endpoint: Arc::from(endpoint),
            realm_id: Arc::from(realm_id),
        }
    }

    /// The configured base endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The realm (company) id every call is scoped to.
    pub fn realm_id(&self) -> &str {
        &self.realm_id
    }

    /// Build `{endpoint}/v3/company/{realm}/{resource}[/{id}]?minorversion=..`.
    ///
    /// Any path or query on the endpoint is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute, hierarchical URL.
    pub fn resource_url(&self, resource: &str, id: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)?;
        if url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        let mut path = format!(
            "/v3/company/{}/{}",
            urlencoding::encode(&self.realm_id),
            resource
        );
        if let Some(id) = id {
            path.push('/');
            path.push_str(&urlencoding::encode(id));
        }
        url.set_path(&path);
        url.set_fragment(None);
        url.query_pairs_mut()
            .clear()
            .append_pair("minorversion", MINOR_VERSION);

        Ok(url)
    }

    /// POST an entity to its endpoint and return the server's version.
    #[tracing::instrument(skip(self, entity), fields(resource = T::ENTITY))]
    pub async fn post_entity<T>(&self, entity: &T) -> Result<T>
    where
        T: Resource + Serialize + Sync,
    {
        let url = self.resource_url(T::PATH, None)?;
        let body = serde_json::to_vec(entity).map_err(QuickBooksError::SerializeError)?;

        let request = HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: vec![
                ("Content-Type".to_string(), JSON.to_string()),
                ("Accept".to_string(), JSON.to_string()),
            ],
            body: Some(body),
        };

        let response = self.transport.send(request).await?;
        Self::decode_entity(response)
    }

    /// GET an entity by id.
    #[tracing::instrument(skip(self), fields(resource = T::ENTITY))]
    pub async fn get_entity<T: Resource>(&self, id: &str) -> Result<T> {
        let url = self.resource_url(T::PATH, Some(id))?;

        let request = HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("Accept".to_string(), JSON.to_string())],
            body: None,
        };

        let response = self.transport.send(request).await?;
        Self::decode_entity(response)
    }

    /// Check the status and unwrap the envelope.
    fn decode_entity<T: Resource>(response: HttpResponse) -> Result<T> {
        if response.status != 200 {
            return Err(QuickBooksError::Fault {
                status: response.status,
                fault: parse_failure(&response.body),
            });
        }

        let envelope: Envelope<T> = serde_json::from_slice(&response.body)?;
        Ok(envelope.into_inner())
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| QuickBooksError::ConfigMissing(format!("{name} environment variable not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> QuickBooksClient {
        QuickBooksClient::with_token("test-token", endpoint, "123145").unwrap()
    }

    #[test]
    fn test_client_debug() {
        let client = client(SANDBOX_ENDPOINT);
        let debug = format!("{:?}", client);
        assert!(debug.contains("QuickBooksClient"));
        assert!(debug.contains("123145"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_resource_url() {
        let url = client(SANDBOX_ENDPOINT).resource_url("purchase", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sandbox-quickbooks.api.intuit.com/v3/company/123145/purchase?minorversion=65"
        );
    }

    #[test]
    fn test_resource_url_with_id() {
        let url = client(SANDBOX_ENDPOINT)
            .resource_url("purchase", Some("42"))
            .unwrap();
        assert_eq!(url.path(), "/v3/company/123145/purchase/42");
    }

    #[test]
    fn test_resource_url_replaces_endpoint_path_and_query() {
        let url = client("https://example.com/api/?minorversion=4&foo=bar")
            .resource_url("purchase", None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/v3/company/123145/purchase?minorversion=65"
        );
    }

    #[test]
    fn test_resource_url_encodes_realm() {
        let client = QuickBooksClient::with_token("t", SANDBOX_ENDPOINT, "a/b c").unwrap();
        let url = client.resource_url("purchase", None).unwrap();
        assert_eq!(url.path(), "/v3/company/a%2Fb%20c/purchase");
    }

    #[test]
    fn test_resource_url_rejects_relative_endpoint() {
        let err = client("not a url").resource_url("purchase", None).unwrap_err();
        assert!(matches!(err, QuickBooksError::UrlError(_)));
    }

    #[test]
    fn test_resource_url_rejects_opaque_endpoint() {
        let err = client("mailto:ops@example.com")
            .resource_url("purchase", None)
            .unwrap_err();
        assert!(matches!(err, QuickBooksError::UrlError(_)));
    }
}
