//! HTTP client for the storefront REST API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod storefront;

pub use storefront::StorefrontClient;

use compact_str::CompactString;
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::objects::{ApiErrorBody, ErrorDetail};

/// Errors produced by the storefront HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code with an error body.
    #[error("api error: status {status}: {}", .detail.summary())]
    Api {
        status: StatusCode,
        detail: ErrorDetail,
    },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// The bearer credential shared by all outgoing authenticated calls.
///
/// The auth session writes it, the HTTP client re-reads it on every
/// request, so clearing the store takes effect for the next call issued —
/// a call already in flight still completes in the name of the old
/// session.
#[derive(Default)]
pub struct CredentialStore {
    token: Mutex<Option<CompactString>>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a bearer token.
    pub fn set(&self, token: impl Into<CompactString>) {
        *self.token.lock() = Some(token.into());
    }

    /// Drop the stored token. Synchronous; subsequent calls omit the
    /// credential header.
    pub fn clear(&self) {
        *self.token.lock() = None;
    }

    /// Snapshot of the current token, if any.
    pub fn token(&self) -> Option<CompactString> {
        self.token.lock().clone()
    }

    /// Whether a token is currently stored.
    pub fn is_present(&self) -> bool {
        self.token.lock().is_some()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself.
        f.debug_struct("CredentialStore")
            .field("present", &self.is_present())
            .finish()
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(error_from_body(status, resp).await);
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

/// Like [`parse_response`] for endpoints whose success body we ignore.
async fn expect_success(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(error_from_body(status, resp).await);
    }
    Ok(())
}

async fn error_from_body(status: StatusCode, resp: reqwest::Response) -> ClientError {
    let body = resp.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => parsed.detail,
        // Not a structured error body; surface the raw text verbatim.
        Err(_) => ErrorDetail::Message(body),
    };
    ClientError::Api { status, detail }
}
