//! HTTP transport abstraction.
//!
//! The client never constructs its own connection; it is handed a
//! [`Transport`] that executes one exchange. [`ReqwestTransport`] is the
//! production implementation and injects the bearer token. Tests plug in
//! their own implementations to observe requests without network I/O.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{QuickBooksError, Result};

const USER_AGENT: &str = concat!("quickbooks-api/", env!("CARGO_PKG_VERSION"));

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes HTTP exchanges on behalf of the client.
///
/// Implementations must be safe to share between tasks; the client holds
/// one behind an `Arc` and may be cloned freely. Any authentication,
/// timeout or proxy policy belongs to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures. Non-success
    /// statuses are returned as ordinary responses.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a shared `reqwest` connection pool.
///
/// Adds `Authorization: Bearer <token>` to every request.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
    token: String,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Build a transport with a default `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new(token: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(QuickBooksError::HttpError)?;

        Ok(Self::with_client(http, token))
    }

    /// Wrap an existing `reqwest` client, sharing its pool and settings.
    pub fn with_client(http: Client, token: &str) -> Self {
        Self {
            http,
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(request.url),
            HttpMethod::Post => self.http.post(request.url),
        };
        builder = builder.bearer_auth(&self.token);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(QuickBooksError::HttpError)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(QuickBooksError::HttpError)?
            .to_vec();

        tracing::debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse { status, body })
    }
}
