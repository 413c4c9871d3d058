//! Observable request state shared by all bindings.

use tokio::sync::watch;

/// Snapshot of a binding's lifecycle: the last successful payload, whether
/// a request is in flight, and the last failure message.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    pub(crate) fn new(loading: bool) -> Self {
        Self {
            data: None,
            loading,
            error: None,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Single-owner state cell with broadcast on change.
pub(crate) struct StateCell<T> {
    tx: watch::Sender<FetchState<T>>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: FetchState<T>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.tx.subscribe()
    }

    pub fn update(&self, f: impl FnOnce(&mut FetchState<T>)) {
        self.tx.send_modify(f);
    }

    pub fn set(&self, state: FetchState<T>) {
        let _ = self.tx.send_replace(state);
    }
}
