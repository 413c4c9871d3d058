//! Mutation binding: one write verb, triggered on demand.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

use crate::bindings::options::BindingOptions;
use crate::bindings::state::{FetchState, StateCell};
use crate::client::ApiClient;
use crate::context::ClientContext;
use crate::Result;

/// Which verb a [`MutationBinding`] issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMethod {
    Post,
    Put,
    Patch,
}

/// Observable POST/PUT/PATCH binding. The verb is fixed at construction.
pub struct MutationBinding<T> {
    client: Arc<ApiClient>,
    method: MutationMethod,
    options: BindingOptions<T>,
    state: StateCell<T>,
}

impl<T> MutationBinding<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(
        ctx: &ClientContext,
        method: MutationMethod,
        options: BindingOptions<T>,
    ) -> Result<Self> {
        Ok(Self {
            client: ctx.client()?,
            method,
            options,
            // Mutations start (and reset to) loading, unlike fetches.
            state: StateCell::new(FetchState::new(true)),
        })
    }

    /// Issue the configured verb against `path` with a JSON body.
    ///
    /// The outcome lands in state, goes to the observers, and comes back as
    /// the return value; failures are never re-thrown past the caller.
    pub async fn trigger<B>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
    {
        self.state.update(|s| s.loading = true);

        let result = match self.method {
            MutationMethod::Post => self.client.post::<B, T>(path, body).await,
            MutationMethod::Put => self.client.put::<B, T>(path, body).await,
            MutationMethod::Patch => self.client.patch::<B, T>(path, body).await,
        };

        match result {
            Ok(data) => {
                self.state.update(|s| {
                    s.data = Some(data.clone());
                    s.error = None;
                    s.loading = false;
                });
                self.options.notify_success(&data);
                Ok(data)
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

    /// Restore the initial state (loading `true` for mutations).
    pub fn reset(&self) {
        self.state.set(FetchState::new(true));
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.snapshot()
    }

    pub fn data(&self) -> Option<T> {
        self.state.snapshot().data
    }

    pub fn loading(&self) -> bool {
        self.state.snapshot().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.snapshot().error
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }
}
