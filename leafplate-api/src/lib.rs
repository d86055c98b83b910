//! Wire types and HTTP client for the Leaf Plate storefront REST API.
//!
//! The `objects` module holds the request/response types shared by any
//! consumer of the API. The `client` module (behind the `client` cargo
//! feature) provides [`client::StorefrontClient`], a typed `reqwest`
//! wrapper over the storefront endpoints, so downstream crates that only
//! need the shared types do not pull in an HTTP stack.

#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod upi;
