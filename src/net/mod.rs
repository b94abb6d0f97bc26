//! Network fetch primitive.
//!
//! The `Fetcher` trait is the crate's only seam to the actual network;
//! `HttpFetcher` is the reqwest-backed implementation. Every fetch either
//! resolves to a `ResponseSnapshot` (any status, including non-2xx) or fails
//! with a `FetchError` when the request itself could not complete.

pub mod error;
pub mod fetcher;

pub use error::FetchError;
pub use fetcher::{Fetcher, HttpFetcher};
