//! Typed HTTP client for the storefront endpoints.

use std::sync::Arc;

use reqwest::Client;
use url::Url;

use super::{ClientError, CredentialStore, expect_success, parse_response};
use crate::objects::auth::{RegisterRequest, TokenResponse, UserProfile};
use crate::objects::catalog::{ContactInfo, ContactRecord, ContactRequest, Product};
use crate::objects::orders::{OrderOutcome, OrderRequest, PaymentConfirmation};

/// Typed HTTP client for the Leaf Plate storefront API.
///
/// Authenticated endpoints read the bearer token from the shared
/// [`CredentialStore`] at request time, so a `clear()` on the store stops
/// credential use for every call issued afterwards.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Client,
    base_url: Url,
    credentials: Arc<CredentialStore>,
}

impl StorefrontClient {
    /// Create a new `StorefrontClient`.
    ///
    /// * `base_url` – root URL of the storefront API server.
    /// * `credentials` – shared credential store, written by the auth
    ///   session.
    pub fn new(base_url: Url, credentials: Arc<CredentialStore>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            credentials,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// The credential store this client reads from.
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET /products/` – list the catalog.
    pub async fn products(&self) -> Result<Vec<Product>, ClientError> {
        let url = self.base_url.join("/products/")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /orders/` – create an order from the cart contents.
    ///
    /// Requires a stored credential. The raw response is collapsed into a
    /// tagged [`OrderOutcome`] so callers never sniff optional fields.
    pub async fn create_order(&self, order: &OrderRequest) -> Result<OrderOutcome, ClientError> {
        let url = self.base_url.join("/orders/")?;
        let resp = self.authorized(self.http.post(url)).json(order).send().await?;
        let raw = parse_response(resp).await?;
        Ok(OrderOutcome::from_response(raw))
    }

    /// `POST /orders/{order_id}/confirm` – submit the UTR for a pending
    /// order.
    pub async fn confirm_payment(
        &self,
        order_id: i64,
        confirmation: &PaymentConfirmation,
    ) -> Result<(), ClientError> {
        let url = self
            .base_url
            .join(&format!("/orders/{order_id}/confirm"))?;
        let resp = self
            .authorized(self.http.post(url))
            .json(confirmation)
            .send()
            .await?;
        expect_success(resp).await
    }

    /// `POST /auth/token` – exchange credentials for a bearer token.
    ///
    /// The endpoint takes a form-encoded body with OAuth-style field
    /// names; the account email goes in `username`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let url = self.base_url.join("/auth/token")?;
        let resp = self
            .http
            .post(url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /auth/register` – create an account.
    ///
    /// Does not establish a session; callers log in afterwards.
    pub async fn register(&self, profile: &RegisterRequest) -> Result<UserProfile, ClientError> {
        let url = self.base_url.join("/auth/register")?;
        let resp = self.http.post(url).json(profile).send().await?;
        parse_response(resp).await
    }

    /// `GET /users/me` – resolve the stored credential to a user profile.
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        let url = self.base_url.join("/users/me")?;
        let resp = self.authorized(self.http.get(url)).send().await?;
        parse_response(resp).await
    }

    /// `GET /contact-info/` – business phone and email.
    pub async fn contact_info(&self) -> Result<ContactInfo, ClientError> {
        let url = self.base_url.join("/contact-info/")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /contact/` – submit the contact form.
    pub async fn send_contact(
        &self,
        message: &ContactRequest,
    ) -> Result<ContactRecord, ClientError> {
        let url = self.base_url.join("/contact/")?;
        let resp = self.http.post(url).json(message).send().await?;
        parse_response(resp).await
    }
}
