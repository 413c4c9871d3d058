//! HTTP client for the ProductFinder API.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod payload;

pub use builder::ApiClientBuilder;
pub use core::ApiClient;
pub use payload::{BlobResponse, FormPayload, GetOptions, ResponseType};
