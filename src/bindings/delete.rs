//! Delete binding: loading/error tracking only, since DELETE carries no
//! response body.

use std::sync::Arc;

use tokio::sync::watch;

use crate::bindings::options::BindingOptions;
use crate::bindings::state::{FetchState, StateCell};
use crate::client::ApiClient;
use crate::context::ClientContext;
use crate::Result;

/// Observable DELETE binding.
pub struct DeleteBinding {
    client: Arc<ApiClient>,
    options: BindingOptions<()>,
    state: StateCell<()>,
}

impl DeleteBinding {
    pub fn new(ctx: &ClientContext, options: BindingOptions<()>) -> Result<Self> {
        Ok(Self {
            client: ctx.client()?,
            options,
            state: StateCell::new(FetchState::new(false)),
        })
    }

    /// DELETE the resource at `path`.
    ///
    /// The outcome lands in state and goes to the observers; failures are
    /// never re-thrown past the caller.
    pub async fn trigger(&self, path: &str) -> Result<()> {
        self.state.update(|s| s.loading = true);

        match self.client.delete(path).await {
            Ok(()) => {
                self.state.update(|s| s.loading = false);
                self.options.notify_success(&());
                Ok(())
            }
            Err(err) => {
                self.state.update(|s| {
                    s.error = Some(err.to_string());
                    s.loading = false;
                });
                self.options.notify_error(&err);
                Err(err)
            }
        }
    }

    pub fn loading(&self) -> bool {
        self.state.snapshot().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.snapshot().error
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<()>> {
        self.state.subscribe()
    }
}
