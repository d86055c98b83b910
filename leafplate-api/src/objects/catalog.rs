//! Catalog and contact types.
//!
//! These endpoints are thin passthroughs: the client fetches and the UI
//! renders, no state of its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as listed by `GET /products/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// Request body for `POST /contact/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// The created contact record echoed back by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Business contact details from `GET /contact-info/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_defaults() {
        let product: Product = serde_json::from_str(
            r#"{"id": 3, "name": "Areca Leaf Plate (25 pack)", "price": "249.00"}"#,
        )
        .unwrap();
        assert!(product.is_available);
        assert!(product.description.is_none());
        assert_eq!(product.price, "249.00".parse::<Decimal>().unwrap());
    }
}
