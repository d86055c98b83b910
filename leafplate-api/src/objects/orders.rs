//! Order creation and payment confirmation types.

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for `POST /orders/`.
///
/// `total_amount` is the client-computed cart total; the server revalidates
/// it against its own price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub total_amount: Decimal,
    pub items: Vec<OrderLine>,
}

/// One cart line inside an [`OrderRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: u32,
}

/// Raw response body of `POST /orders/`.
///
/// Which optional fields are present depends on the payment flow the
/// server chose; use [`OrderOutcome::from_response`] instead of sniffing
/// the fields directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: i64,
    #[serde(default)]
    pub upi_uri: Option<String>,
    /// Legacy alias for `upi_uri` still emitted by older server builds.
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Discriminated result of order creation.
///
/// Collapses the optional-field combinations of [`OrderCreated`] into the
/// two shapes the server actually produces.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    /// The order was created and now awaits a UPI payment.
    PaymentPending {
        order_id: i64,
        upi_uri: String,
        total_amount: Option<Decimal>,
    },
    /// The order was accepted with no payment step (cash/manual flow).
    Confirmed {
        order_id: i64,
        message: Option<String>,
    },
}

impl OrderOutcome {
    /// Classify a raw creation response.
    pub fn from_response(raw: OrderCreated) -> Self {
        match raw.upi_uri.or(raw.payment_url) {
            Some(upi_uri) => OrderOutcome::PaymentPending {
                order_id: raw.order_id,
                upi_uri,
                total_amount: raw.total_amount,
            },
            None => OrderOutcome::Confirmed {
                order_id: raw.order_id,
                message: raw.message,
            },
        }
    }

    /// The server-assigned order id, whichever variant this is.
    pub fn order_id(&self) -> i64 {
        match self {
            OrderOutcome::PaymentPending { order_id, .. }
            | OrderOutcome::Confirmed { order_id, .. } => *order_id,
        }
    }
}

impl From<OrderCreated> for OrderOutcome {
    fn from(raw: OrderCreated) -> Self {
        Self::from_response(raw)
    }
}

/// Request body for `POST /orders/{order_id}/confirm`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub utr_number: CompactString,
}
