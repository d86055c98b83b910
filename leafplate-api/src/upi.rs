//! Minimal helpers for UPI payment URIs.
//!
//! The storefront only ever *consumes* these URIs: the server builds them
//! and the client displays the encoded amount next to the QR code. Nothing
//! here validates the URI beyond what extraction needs.

use url::Url;

/// Extract the payment amount (`am` query parameter) from a UPI URI.
///
/// Returns `None` when the URI does not parse or carries no amount.
pub fn payment_amount(uri: &str) -> Option<String> {
    let parsed = Url::parse(uri).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "am")
        .map(|(_, value)| value.into_owned())
}
