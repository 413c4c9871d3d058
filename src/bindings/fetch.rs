//! Fetch binding: a GET call whose lifecycle is observable state.
//!
//! The binding auto-fetches at construction and on path changes, unless
//! suppressed by `skip` or `manual`. Auto-fetches run as spawned tasks;
//! starting a new one aborts the previous one, and dropping the binding
//! aborts whatever is in flight, so a stale response never writes state
//! for a consumer that moved on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::bindings::options::FetchOptions;
use crate::bindings::state::{FetchState, StateCell};
use crate::client::ApiClient;
use crate::context::ClientContext;
use crate::Result;

/// Observable GET binding for one path.
///
/// Must be constructed inside a Tokio runtime; auto-fetches are spawned
/// tasks.
pub struct FetchBinding<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    client: Arc<ApiClient>,
    options: FetchOptions<T>,
    skip: AtomicBool,
    path: Mutex<String>,
    /// Set after an auto-fetch evaluation ran for the current path; cleared
    /// while skipped so un-skipping fetches again.
    has_fetched: AtomicBool,
    state: StateCell<T>,
    inflight: Mutex<Option<JoinHandle<()>>>,
}

impl<T> FetchBinding<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create the binding and run the initial auto-fetch decision.
    pub fn new(
        ctx: &ClientContext,
        path: impl Into<String>,
        options: FetchOptions<T>,
    ) -> Result<Self> {
        let client = ctx.client()?;
        let initial_loading = !options.manual && !options.skip;
        let skip = options.skip;

        let inner = Arc::new(Inner {
            client,
            skip: AtomicBool::new(skip),
            options,
            path: Mutex::new(path.into()),
            has_fetched: AtomicBool::new(false),
            state: StateCell::new(FetchState::new(initial_loading)),
            inflight: Mutex::new(None),
        });

        let binding = Self { inner };
        binding.evaluate();
        Ok(binding)
    }

    /// Point the binding at a new path and re-run the auto-fetch decision.
    pub fn set_path(&self, path: impl Into<String>) {
        *lock(&self.inner.path) = path.into();
        self.evaluate();
    }

    /// Flip the skip flag. Leaving the skipped state re-arms the auto-fetch
    /// for the current path.
    pub fn set_skip(&self, skip: bool) {
        self.inner.skip.store(skip, Ordering::SeqCst);
        self.evaluate();
    }

    /// Manual trigger. Aborts any auto-fetch in flight, runs inline, and
    /// returns the outcome. `Ok(None)` means the binding is skipped and
    /// nothing ran.
    pub async fn refetch(&self) -> Result<Option<T>> {
        if self.inner.skip.load(Ordering::SeqCst) {
            return Ok(None);
        }
        if let Some(prev) = lock(&self.inner.inflight).take() {
            prev.abort();
        }
        self.inner.run_fetch().await.map(Some)
    }

    /// Clear data, loading, and error back to their idle values.
    pub fn reset(&self) {
        self.inner.state.set(FetchState::new(false));
    }

    pub fn state(&self) -> FetchState<T> {
        self.inner.state.snapshot()
    }

    pub fn data(&self) -> Option<T> {
        self.inner.state.snapshot().data
    }

    pub fn loading(&self) -> bool {
        self.inner.state.snapshot().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.snapshot().error
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }

    /// The auto-fetch decision, re-run on construction and whenever path or
    /// skip change.
    fn evaluate(&self) {
        let inner = &self.inner;
        if inner.skip.load(Ordering::SeqCst) {
            // While skipped, forget the current path was ever fetched.
            inner.has_fetched.store(false, Ordering::SeqCst);
            return;
        }
        if inner.options.manual {
            return;
        }
        if !inner.has_fetched.load(Ordering::SeqCst) || inner.options.url_refetch {
            self.spawn_fetch();
        }
        inner.has_fetched.store(true, Ordering::SeqCst);
    }

    fn spawn_fetch(&self) {
        let inner = Arc::clone(&self.inner);
        let mut guard = lock(&self.inner.inflight);
        // Newest fetch wins; the superseded one must not write state.
        if let Some(prev) = guard.take() {
            prev.abort();
        }
        *guard = Some(tokio::spawn(async move {
            let _ = inner.run_fetch().await;
        }));
    }
}

impl<T> Inner<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    async fn run_fetch(&self) -> Result<T> {
        let path = lock(&self.path).clone();
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.client.get::<T>(&path).await {
            Ok(data) => {
                self.state.update(|s| {
                    s.data = Some(data.clone());
                    s.error = None;
                    s.loading = false;
                });
                self.options.observers.notify_success(&data);
                Ok(data)
            }
            Err(err) => {
                self.state.update(|s| {
                    s.error = Some(err.to_string());
                    s.loading = false;
                });
                self.options.observers.notify_error(&err);
                Err(err)
            }
        }
    }
}

impl<T> Drop for FetchBinding<T> {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.inner.inflight).take() {
            handle.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
