//! Authentication and account types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Response body of `POST /auth/token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: CompactString,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Request body for `POST /auth/register`.
///
/// All fields are required by the server; shipping details are collected
/// up front because orders are refused without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub shipping_address: String,
}

/// The authenticated user, as returned by `GET /users/me` and the
/// registration echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
}

impl UserProfile {
    /// Whether the profile carries everything an order shipment needs.
    pub fn has_shipping_details(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.phone) && filled(&self.shipping_address)
    }
}
