//! The seam between the checkout core and the Order API.
//!
//! Components take an `Arc<dyn OrderGateway>` instead of a concrete HTTP
//! client, so unit tests drive the state machine with scripted responses
//! and production wires in [`StorefrontClient`].

use async_trait::async_trait;
use compact_str::CompactString;

use leafplate_api::client::{ClientError, StorefrontClient};
use leafplate_api::objects::ErrorDetail;
use leafplate_api::objects::auth::{RegisterRequest, UserProfile};
use leafplate_api::objects::orders::{OrderOutcome, OrderRequest, PaymentConfirmation};

/// Error at the gateway boundary, split along the propagation policy:
/// server-reported rejections carry the authoritative message, transport
/// failures carry nothing the user should see.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The server answered with an error body.
    #[error("{}", .0.summary())]
    Rejected(ErrorDetail),

    /// No usable response at all (connection failure, bad body, …).
    #[error("no response from server: {0}")]
    Transport(String),
}

impl From<ClientError> for GatewayError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { detail, .. } => GatewayError::Rejected(detail),
            ClientError::Http(e) => GatewayError::Transport(e.to_string()),
            ClientError::Json(e) => GatewayError::Transport(e.to_string()),
            ClientError::Url(e) => GatewayError::Transport(e.to_string()),
        }
    }
}

/// The Order API operations the checkout core depends on.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Create an order; the server decides whether a payment step follows.
    async fn create_order(&self, order: OrderRequest) -> Result<OrderOutcome, GatewayError>;

    /// Confirm a pending order with a validated UTR.
    async fn confirm_payment(
        &self,
        order_id: i64,
        confirmation: PaymentConfirmation,
    ) -> Result<(), GatewayError>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<CompactString, GatewayError>;

    /// Create an account. Does not establish a session.
    async fn register(&self, profile: RegisterRequest) -> Result<UserProfile, GatewayError>;

    /// Resolve the stored credential to a user profile.
    async fn fetch_me(&self) -> Result<UserProfile, GatewayError>;
}

#[async_trait]
impl OrderGateway for StorefrontClient {
    async fn create_order(&self, order: OrderRequest) -> Result<OrderOutcome, GatewayError> {
        Ok(StorefrontClient::create_order(self, &order).await?)
    }

    async fn confirm_payment(
        &self,
        order_id: i64,
        confirmation: PaymentConfirmation,
    ) -> Result<(), GatewayError> {
        Ok(StorefrontClient::confirm_payment(self, order_id, &confirmation).await?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<CompactString, GatewayError> {
        let token = StorefrontClient::login(self, email, password).await?;
        Ok(token.access_token)
    }

    async fn register(&self, profile: RegisterRequest) -> Result<UserProfile, GatewayError> {
        Ok(StorefrontClient::register(self, &profile).await?)
    }

    async fn fetch_me(&self) -> Result<UserProfile, GatewayError> {
        Ok(StorefrontClient::me(self).await?)
    }
}
