//! Scripted [`OrderGateway`] stub shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use compact_str::CompactString;
use parking_lot::Mutex;
use tokio::sync::Notify;

use leafplate_api::objects::ErrorDetail;
use leafplate_api::objects::auth::{RegisterRequest, UserProfile};
use leafplate_api::objects::orders::{OrderOutcome, OrderRequest, PaymentConfirmation};

use crate::gateway::{GatewayError, OrderGateway};

/// Gateway double with per-endpoint response queues, call counters, and
/// optional gates to park a call mid-flight.
#[derive(Default)]
pub(crate) struct StubGateway {
    pub orders: Mutex<VecDeque<Result<OrderOutcome, GatewayError>>>,
    pub confirms: Mutex<VecDeque<Result<(), GatewayError>>>,
    pub tokens: Mutex<VecDeque<Result<CompactString, GatewayError>>>,
    pub profiles: Mutex<VecDeque<Result<UserProfile, GatewayError>>>,
    pub registrations: Mutex<VecDeque<Result<UserProfile, GatewayError>>>,

    pub order_calls: AtomicUsize,
    pub confirm_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,

    pub last_order: Mutex<Option<OrderRequest>>,
    pub last_confirmation: Mutex<Option<(i64, PaymentConfirmation)>>,

    /// When set, `create_order` waits on the notify before answering.
    pub order_gate: Mutex<Option<Arc<Notify>>>,
    /// When set, `confirm_payment` waits on the notify before answering.
    pub confirm_gate: Mutex<Option<Arc<Notify>>>,
    /// When set, `fetch_me` waits on the notify before answering.
    pub profile_gate: Mutex<Option<Arc<Notify>>>,
}

impl StubGateway {
    pub fn rejected(msg: &str) -> GatewayError {
        GatewayError::Rejected(ErrorDetail::Message(msg.to_string()))
    }

    pub fn user(id: i64) -> UserProfile {
        UserProfile {
            id,
            email: format!("user{id}@example.com"),
            full_name: Some("Test User".to_string()),
            phone: Some("9876543210".to_string()),
            shipping_address: Some("12 Palm Row, Chennai".to_string()),
        }
    }

    pub fn registration() -> RegisterRequest {
        RegisterRequest {
            email: "new@example.com".to_string(),
            password: "pw".to_string(),
            full_name: "New User".to_string(),
            phone: "9876543210".to_string(),
            shipping_address: "12 Palm Row, Chennai".to_string(),
        }
    }

    fn missing(endpoint: &str) -> GatewayError {
        GatewayError::Transport(format!("no scripted response for {endpoint}"))
    }
}

#[async_trait]
impl OrderGateway for StubGateway {
    async fn create_order(&self, order: OrderRequest) -> Result<OrderOutcome, GatewayError> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_order.lock() = Some(order);
        let gate = self.order_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.orders
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("create_order")))
    }

    async fn confirm_payment(
        &self,
        order_id: i64,
        confirmation: PaymentConfirmation,
    ) -> Result<(), GatewayError> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_confirmation.lock() = Some((order_id, confirmation));
        let gate = self.confirm_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.confirms
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("confirm_payment")))
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<CompactString, GatewayError> {
        self.tokens
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("login")))
    }

    async fn register(&self, _profile: RegisterRequest) -> Result<UserProfile, GatewayError> {
        self.registrations
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("register")))
    }

    async fn fetch_me(&self) -> Result<UserProfile, GatewayError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.profile_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.profiles
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("fetch_me")))
    }
}
