//! # productfinder-client
//!
//! HTTP API client and observable state bindings for the ProductFinder
//! backend.
//!
//! ## Overview
//!
//! The crate has two layers. [`ApiClient`] is the request/response pipeline:
//! it owns a base URL and a connection pool, stamps every attempt with a
//! fresh W3C `traceparent` header, retries exactly once on 401, maps 403 to
//! a fixed access-denied error, and normalizes every other failure into a
//! single human-readable message. The binding layer ([`FetchBinding`],
//! [`MutationBinding`], [`DeleteBinding`]) is thin glue that runs client
//! calls and reshapes their lifecycle into observable data/loading/error
//! state, distributed to consumers through an explicit [`ClientContext`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use productfinder_client::{ApiClient, ClientContext, FetchBinding, FetchOptions};
//! use serde::Deserialize;
//!
//! #[derive(Clone, Deserialize)]
//! struct Product {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> productfinder_client::Result<()> {
//!     let client = ApiClient::new("https://api.productfinder.example")?;
//!     let ctx = ClientContext::new(client);
//!
//!     let products: FetchBinding<Vec<Product>> =
//!         FetchBinding::new(&ctx, "/products", FetchOptions::new())?;
//!
//!     let mut updates = products.subscribe();
//!     updates.changed().await.ok();
//!     // Branch on the data/loading/error triple...
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | `ApiClient`, its builder, and payload/response types |
//! | [`bindings`] | Fetch, mutation, and delete bindings with observable state |
//! | [`context`] | Explicit client distribution with a fail-fast accessor |
//! | [`trace`] | W3C trace-context header generation |
//! | [`error`] | Unified error taxonomy |

pub mod bindings;
pub mod client;
pub mod context;
pub mod trace;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;

// Re-export main types for convenience
pub use bindings::{
    BindingOptions, DeleteBinding, FetchBinding, FetchOptions, FetchState, MutationBinding,
    MutationMethod,
};
pub use client::{ApiClient, ApiClientBuilder, BlobResponse, FormPayload, GetOptions, ResponseType};
pub use context::ClientContext;
pub use trace::TraceContext;
