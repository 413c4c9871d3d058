//! Explicit distribution of a shared [`ApiClient`] to bindings.
//!
//! No hidden global lookup: consumers construct one context with the
//! client and pass it to every binding. The empty context exists so wiring
//! mistakes fail fast with a configuration error instead of surfacing as
//! network failures later.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::{Error, Result};

/// Holds the single client instance bindings resolve at construction time.
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    client: Option<Arc<ApiClient>>,
}

impl ClientContext {
    /// Wrap a client for distribution.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Some(Arc::new(client)),
        }
    }

    /// Wrap an already-shared client.
    pub fn from_shared(client: Arc<ApiClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A context with no client. Every accessor call fails fast.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve the client, failing fast when none was supplied.
    pub fn client(&self) -> Result<Arc<ApiClient>> {
        self.client.clone().ok_or_else(|| {
            Error::configuration(
                "no ApiClient was supplied; construct the context with ClientContext::new",
            )
        })
    }
}
