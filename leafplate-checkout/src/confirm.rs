//! Payment confirmation: UTR validation and submission.
//!
//! A UPI UTR (transaction reference) is always exactly 12 decimal digits.
//! Validation happens locally before any network call, so malformed input
//! never costs a round-trip. The server owns every other rule (duplicate
//! UTRs, already-confirmed orders) and its rejection reasons are surfaced
//! verbatim.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use compact_str::CompactString;
use tracing::{debug, info, warn};

use leafplate_api::objects::orders::PaymentConfirmation;

use crate::gateway::{GatewayError, OrderGateway};

/// Shown when a submission gets no response at all.
const SUBMIT_FALLBACK: &str = "Failed to submit. Please try again.";

/// Confirmation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfirmError {
    /// Input did not normalize to 12 digits; detected locally, no network
    /// call was made.
    #[error(
        "UTR must be exactly 12 digits. Check your UPI app's transaction history for the 12-digit reference number."
    )]
    InvalidFormat,

    /// The server refused a well-formed UTR; message verbatim.
    #[error("{0}")]
    Rejected(String),

    /// A submission is already outstanding for this confirmer.
    #[error("a confirmation is already being submitted")]
    InFlight,

    /// No order is awaiting payment.
    #[error("no order is awaiting payment")]
    NoPendingOrder,
}

/// A validated 12-digit UPI transaction reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UtrNumber(CompactString);

impl UtrNumber {
    /// Normalize and validate raw user input.
    ///
    /// Whitespace and `-` separators are stripped (UPI apps display UTRs
    /// grouped); the remainder must be exactly 12 ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, ConfirmError> {
        let cleaned: CompactString = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if cleaned.len() == 12 && cleaned.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(cleaned))
        } else {
            Err(ConfirmError::InvalidFormat)
        }
    }

    /// The normalized digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UtrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submits a validated UTR to confirm a pending order.
///
/// Submissions are serialized: while one is outstanding, further calls
/// fail with [`ConfirmError::InFlight`] instead of issuing a second
/// request. Confirmation is idempotent server-side, so a retry after an
/// ambiguous outcome is safe.
pub struct PaymentConfirmer {
    gateway: Arc<dyn OrderGateway>,
    in_flight: AtomicBool,
}

impl PaymentConfirmer {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Validate `raw_utr` and submit it for `order_id`.
    ///
    /// Exactly one network call is made per successful validation pass.
    pub async fn submit(&self, order_id: i64, raw_utr: &str) -> Result<UtrNumber, ConfirmError> {
        let utr = UtrNumber::parse(raw_utr)?;

        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(ConfirmError::InFlight);
        }
        debug!(order_id, "submitting payment confirmation");
        let result = self
            .gateway
            .confirm_payment(
                order_id,
                PaymentConfirmation {
                    utr_number: utr.0.clone(),
                },
            )
            .await;
        self.in_flight.store(false, Ordering::Release);

        match result {
            Ok(()) => {
                info!(order_id, "payment confirmation recorded");
                Ok(utr)
            }
            Err(GatewayError::Rejected(detail)) => {
                Err(ConfirmError::Rejected(detail.summary_or(SUBMIT_FALLBACK)))
            }
            Err(GatewayError::Transport(err)) => {
                warn!(order_id, error = %err, "confirmation submission got no response");
                Err(ConfirmError::Rejected(SUBMIT_FALLBACK.to_string()))
            }
        }
    }
}
