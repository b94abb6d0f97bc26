//! Data models for intercepted requests and cached responses.
//!
//! - `ResourceRequest`, `Destination`: the canonicalized request descriptor
//!   used as the cache key
//! - `ResponseSnapshot`: a full response (status, headers, body bytes)
//!   as stored in a generation

pub mod request;
pub mod response;

pub use request::{Destination, ResourceRequest};
pub use response::ResponseSnapshot;
