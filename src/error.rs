use thiserror::Error;

/// Unified error type for the ProductFinder client.
///
/// Every failure path exposes a single human-readable message through
/// `Display`; API failures additionally carry the HTTP status and status
/// text for structured handling in `on_error` observers.
#[derive(Debug, Error)]
pub enum Error {
    /// Wiring mistake, not a network error: a binding asked an empty
    /// [`ClientContext`](crate::ClientContext) for its client.
    #[error("{message}")]
    Configuration { message: String },

    /// HTTP 403. The response body is never read for this status.
    #[error("Access denied: You do not have permission to access ProductFinder")]
    AccessDenied,

    /// Any other non-success status, with the message extracted from the
    /// response body.
    #[error("{message}")]
    Api {
        status: u16,
        status_text: String,
        message: String,
    },

    /// Network failure before any HTTP status was obtained, or a response
    /// body that could not be read or decoded. Propagated as-is from the
    /// transport.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::AccessDenied => Some(403),
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
