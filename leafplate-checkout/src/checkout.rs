//! Checkout controller: the state machine from cart to confirmed order.
//!
//! Phases: `Idle → Processing → {AwaitingPayment, Confirmed, Failed} →
//! Idle`. The phase is an explicit guard — network calls suspend only the
//! calling task, so a double click lands on `Processing` and is dropped
//! instead of submitting a second order.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use leafplate_api::objects::orders::OrderOutcome;
use leafplate_api::upi;

use crate::cart::CartStore;
use crate::confirm::{ConfirmError, PaymentConfirmer};
use crate::gateway::{GatewayError, OrderGateway};
use crate::session::AuthSession;

/// Shown when order creation fails with no usable server message.
const ORDER_FALLBACK: &str = "Failed to place order. Please try again.";

/// Confirmation message when the server supplies none.
const CONFIRMED_FALLBACK: &str = "Order placed!";

/// Checkout behavior knobs.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// How long a no-payment confirmation stays on screen before the flow
    /// resets to idle.
    pub confirmed_display_delay: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            confirmed_display_delay: Duration::from_secs(4),
        }
    }
}

/// Context carried while an order awaits its UPI payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPayment {
    pub order_id: i64,
    pub upi_uri: String,
    pub total_amount: Decimal,
}

impl PendingPayment {
    /// The amount encoded in the UPI URI's `am` parameter, for display
    /// only. The URI itself is opaque to the client.
    pub fn display_amount(&self) -> Option<String> {
        upi::payment_amount(&self.upi_uri)
    }
}

/// Why an order was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutFailure {
    /// The profile lacks shipping details; user-actionable before
    /// reordering.
    #[error("Please add your shipping address and phone number in your profile before ordering.")]
    IncompleteProfile,

    /// Any other server-side refusal, message verbatim from the server.
    #[error("{0}")]
    OrderRejected(String),
}

impl CheckoutFailure {
    fn classify(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected(detail) => {
                let message = detail.summary();
                if message.contains("Shipping address") {
                    CheckoutFailure::IncompleteProfile
                } else if message.trim().is_empty() {
                    CheckoutFailure::OrderRejected(ORDER_FALLBACK.to_string())
                } else {
                    CheckoutFailure::OrderRejected(message)
                }
            }
            GatewayError::Transport(_) => CheckoutFailure::OrderRejected(ORDER_FALLBACK.to_string()),
        }
    }
}

/// The state driving the checkout UI.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPhase {
    Idle,
    Processing,
    AwaitingPayment(PendingPayment),
    Confirmed { order_id: i64, message: String },
    Failed(CheckoutFailure),
}

/// Checkout needs a signed-in user; present the login flow and retry
/// after authentication succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("sign in before checking out")]
pub struct AuthRequired;

/// Orchestrates order creation and payment confirmation against the
/// injected gateway, cart and session.
pub struct CheckoutController {
    gateway: Arc<dyn OrderGateway>,
    cart: Arc<CartStore>,
    session: Arc<AuthSession>,
    confirmer: PaymentConfirmer,
    phase: Arc<Mutex<CheckoutPhase>>,
    confirmed_display_delay: Duration,
}

impl CheckoutController {
    pub fn new(
        gateway: Arc<dyn OrderGateway>,
        cart: Arc<CartStore>,
        session: Arc<AuthSession>,
    ) -> Self {
        Self::with_config(gateway, cart, session, CheckoutConfig::default())
    }

    pub fn with_config(
        gateway: Arc<dyn OrderGateway>,
        cart: Arc<CartStore>,
        session: Arc<AuthSession>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            confirmer: PaymentConfirmer::new(Arc::clone(&gateway)),
            gateway,
            cart,
            session,
            phase: Arc::new(Mutex::new(CheckoutPhase::Idle)),
            confirmed_display_delay: config.confirmed_display_delay,
        }
    }

    /// Snapshot of the current phase.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase.lock().clone()
    }

    /// Submit the cart as an order.
    ///
    /// Requires a signed-in user; without one no network call is made and
    /// [`AuthRequired`] is signalled. Only `Idle` and `Failed` start a new
    /// attempt: while one is outstanding, or an order from this flow is
    /// already awaiting payment or showing its confirmation, the call is a
    /// no-op returning the current phase. On a payment-pending outcome the
    /// cart is cleared — the order is committed server-side and the cart
    /// is no longer the source of truth. On failure the cart is untouched.
    pub async fn checkout(&self) -> Result<CheckoutPhase, AuthRequired> {
        if self.session.current_user().is_none() {
            debug!("checkout blocked, no authenticated user");
            return Err(AuthRequired);
        }

        {
            let mut phase = self.phase.lock();
            if !matches!(*phase, CheckoutPhase::Idle | CheckoutPhase::Failed(_)) {
                // A submission is outstanding or an order already exists
                // for this flow; a stray trigger must not re-submit the
                // (by then empty) cart as a second order.
                return Ok(phase.clone());
            }
            *phase = CheckoutPhase::Processing;
        }

        let request = self.cart.order_request();
        let request_total = request.total_amount;
        info!(total = %request_total, lines = request.items.len(), "submitting order");

        let next = match self.gateway.create_order(request).await {
            Ok(OrderOutcome::PaymentPending {
                order_id,
                upi_uri,
                total_amount,
            }) => {
                self.cart.clear();
                info!(order_id, "order created, awaiting payment");
                CheckoutPhase::AwaitingPayment(PendingPayment {
                    order_id,
                    upi_uri,
                    total_amount: total_amount.unwrap_or(request_total),
                })
            }
            Ok(OrderOutcome::Confirmed { order_id, message }) => {
                info!(order_id, "order confirmed without payment step");
                CheckoutPhase::Confirmed {
                    order_id,
                    message: message.unwrap_or_else(|| CONFIRMED_FALLBACK.to_string()),
                }
            }
            Err(err) => {
                warn!(error = %err, "order creation failed");
                CheckoutPhase::Failed(CheckoutFailure::classify(err))
            }
        };

        *self.phase.lock() = next.clone();
        if let CheckoutPhase::Confirmed { order_id, .. } = &next {
            self.schedule_confirmed_reset(*order_id);
        }
        Ok(next)
    }

    /// Confirm the pending order with raw UTR input.
    ///
    /// Only meaningful in `AwaitingPayment`. Success is terminal
    /// (`Confirmed`); a rejection leaves the phase untouched so the user
    /// can retry with corrected input.
    pub async fn confirm_payment(&self, raw_utr: &str) -> Result<CheckoutPhase, ConfirmError> {
        let pending = match &*self.phase.lock() {
            CheckoutPhase::AwaitingPayment(pending) => pending.clone(),
            _ => return Err(ConfirmError::NoPendingOrder),
        };

        let utr = self.confirmer.submit(pending.order_id, raw_utr).await?;
        let next = CheckoutPhase::Confirmed {
            order_id: pending.order_id,
            message: format!("Your UTR {utr} has been recorded. We'll confirm your order shortly."),
        };
        *self.phase.lock() = next.clone();
        Ok(next)
    }

    /// Dismiss the flow: back to `Idle`, local context discarded. An
    /// order already created server-side is not cancelled.
    pub fn close(&self) {
        let mut phase = self.phase.lock();
        if !matches!(*phase, CheckoutPhase::Idle) {
            let from = phase.clone();
            debug!(?from, "checkout flow closed");
        }
        *phase = CheckoutPhase::Idle;
    }

    /// After the display delay, clear the cart (the order is committed;
    /// its items must not be ordered twice) and, if the confirmation for
    /// this order is still showing, return to idle.
    fn schedule_confirmed_reset(&self, order_id: i64) {
        let phase = Arc::clone(&self.phase);
        let cart = Arc::clone(&self.cart);
        let delay = self.confirmed_display_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            cart.clear();
            let mut phase = phase.lock();
            let still_showing = matches!(
                &*phase,
                CheckoutPhase::Confirmed { order_id: shown, .. } if *shown == order_id
            );
            if still_showing {
                *phase = CheckoutPhase::Idle;
            }
        });
    }
}
