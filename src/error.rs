//! Error types for QuickBooks API operations.

use thiserror::Error;

use crate::fault::Fault;

/// Errors that can occur during QuickBooks API operations.
#[derive(Debug, Error)]
pub enum QuickBooksError {
    /// Configuration is missing or incomplete.
    #[error("QuickBooks configuration required: {0}")]
    ConfigMissing(String),

    /// The configured base endpoint is not a valid URL.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// The request body could not be marshaled to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializeError(#[source] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server rejected the request with a non-200 status.
    #[error("QuickBooks API error (HTTP {status}): {fault}")]
    Fault { status: u16, fault: Fault },

    /// A 200 response whose body did not match the expected envelope.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl QuickBooksError {
    /// The remote fault, if the server rejected the request.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault { fault, .. } => Some(fault),
            _ => None,
        }
    }

    /// The HTTP status of a remote rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fault { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for QuickBooks operations.
pub type Result<T> = core::result::Result<T, QuickBooksError>;
