//! Caller-supplied configuration for bindings.

use std::sync::Arc;

use crate::Error;

type SuccessObserver<T> = Arc<dyn Fn(&T) + Send + Sync>;
type ErrorObserver = Arc<dyn Fn(&Error) + Send + Sync>;

/// Optional success/error observers, shared by every binding.
///
/// Observers are invoked once per completed request, in addition to the
/// result the trigger returns and the state the binding records. The error
/// observer receives the full [`Error`], which for API failures carries
/// status, status text, and message.
#[derive(Clone)]
pub struct BindingOptions<T> {
    pub(crate) on_success: Option<SuccessObserver<T>>,
    pub(crate) on_error: Option<ErrorObserver>,
}

impl<T> Default for BindingOptions<T> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
        }
    }
}

impl<T> BindingOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    pub(crate) fn notify_success(&self, data: &T) {
        if let Some(f) = &self.on_success {
            f(data);
        }
    }

    pub(crate) fn notify_error(&self, err: &Error) {
        if let Some(f) = &self.on_error {
            f(err);
        }
    }
}

/// Options for the data-fetch binding.
#[derive(Clone)]
pub struct FetchOptions<T> {
    /// Suppress fetching entirely while set.
    pub skip: bool,
    /// Never auto-fetch; only [`FetchBinding::refetch`](crate::FetchBinding::refetch) runs.
    pub manual: bool,
    /// Force the auto-fetch to run on every path change, even when the
    /// path was already fetched.
    pub url_refetch: bool,
    pub(crate) observers: BindingOptions<T>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            skip: false,
            manual: false,
            url_refetch: false,
            observers: BindingOptions::default(),
        }
    }
}

impl<T> FetchOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    pub fn manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    pub fn url_refetch(mut self, url_refetch: bool) -> Self {
        self.url_refetch = url_refetch;
        self
    }

    pub fn on_success(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.observers = self.observers.on_success(f);
        self
    }

    pub fn on_error(mut self, f: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.observers = self.observers.on_error(f);
        self
    }
}
