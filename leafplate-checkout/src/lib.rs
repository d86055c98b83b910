//! Client-side checkout core for the Leaf Plate storefront.
//!
//! Holds the state the UI renders from: the cart, the auth session, the
//! checkout state machine and the payment-confirmation submitter. All
//! network traffic goes through the [`gateway::OrderGateway`] seam so the
//! components can be driven by a mock in tests and by
//! [`leafplate_api::client::StorefrontClient`] in production.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

pub mod cart;
pub mod checkout;
pub mod confirm;
pub mod gateway;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
