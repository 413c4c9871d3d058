//! State bindings over the API client.
//!
//! Each binding wraps one request lifecycle and exposes it as observable
//! data/loading/error state. A binding owns its state cell exclusively;
//! consumers read snapshots or subscribe to the watch channel for changes.
//! Failures never propagate past a binding: they land in state, go to the
//! `on_error` observer, and come back as the tagged result of the trigger.

pub mod delete;
pub mod fetch;
pub mod mutation;
pub mod options;
pub mod state;

pub use delete::DeleteBinding;
pub use fetch::FetchBinding;
pub use mutation::{MutationBinding, MutationMethod};
pub use options::{BindingOptions, FetchOptions};
pub use state::FetchState;
