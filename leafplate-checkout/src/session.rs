//! Auth session: the current user and the bearer credential.
//!
//! The credential lives in the shared [`CredentialStore`] that every
//! authenticated HTTP call reads at request time, so `logout()` takes
//! effect synchronously for calls issued afterwards. The user profile is
//! resolved from the token via `GET /users/me`; a token that cannot be
//! resolved is never kept.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use compact_str::CompactString;
use parking_lot::Mutex;
use tracing::{debug, warn};

use leafplate_api::client::CredentialStore;
use leafplate_api::objects::auth::{RegisterRequest, UserProfile};

use crate::gateway::{GatewayError, OrderGateway};

/// Authentication and registration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The server rejected the credentials; carries its reason.
    #[error("{0}")]
    Rejected(String),

    /// Registration field errors, aggregated into one summary line.
    #[error("{0}")]
    Validation(String),

    /// No response from the server.
    #[error("could not reach the server, please try again")]
    Transport,

    /// A sign-out (or a newer sign-in) superseded this attempt while its
    /// profile fetch was still in flight; no session was established.
    #[error("signed out before sign-in completed")]
    SignedOut,
}

/// The current session. Hand out in an `Arc`; all methods take `&self`.
pub struct AuthSession {
    gateway: Arc<dyn OrderGateway>,
    credentials: Arc<CredentialStore>,
    user: Mutex<Option<UserProfile>>,
    /// Bumped on every token install and logout. A profile fetch only
    /// applies its result while the epoch it started under is still
    /// current, so a fetch that outlives a logout cannot resurrect the
    /// user.
    epoch: AtomicU64,
}

impl AuthSession {
    /// Create a session over the given gateway and credential store.
    ///
    /// The store may already hold a persisted token; call
    /// [`restore`](Self::restore) to resolve it.
    pub fn new(gateway: Arc<dyn OrderGateway>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            gateway,
            credentials,
            user: Mutex::new(None),
            epoch: AtomicU64::new(0),
        }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.user.lock().clone()
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.lock().is_some()
    }

    /// The credential store shared with the HTTP client.
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Exchange credentials for a token and resolve the user profile.
    ///
    /// The profile fetch failing tears the session back down: a token
    /// without a resolvable user is never left behind.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let token = self
            .gateway
            .login(email, password)
            .await
            .map_err(|err| match err {
                GatewayError::Rejected(detail) => {
                    AuthError::Rejected(detail.summary_or("Invalid email or password"))
                }
                GatewayError::Transport(_) => AuthError::Transport,
            })?;

        let epoch = self.install_token(token);
        match self.gateway.fetch_me().await {
            Ok(profile) => {
                // A logout (or newer login) during the fetch wins; the
                // stale result is discarded and the caller must not
                // believe a session exists.
                if self.epoch.load(Ordering::Acquire) != epoch {
                    debug!("session changed during profile fetch, discarding result");
                    return Err(AuthError::SignedOut);
                }
                *self.user.lock() = Some(profile.clone());
                debug!(user_id = profile.id, "session established");
                Ok(profile)
            }
            Err(err) => {
                warn!(error = %err, "token accepted but profile fetch failed, signing out");
                self.logout();
                Err(match err {
                    GatewayError::Rejected(detail) => {
                        AuthError::Rejected(detail.summary_or("Could not load your account"))
                    }
                    GatewayError::Transport(_) => AuthError::Transport,
                })
            }
        }
    }

    /// Create an account. Does not establish a session; log in afterwards.
    pub async fn register(&self, profile: RegisterRequest) -> Result<UserProfile, AuthError> {
        self.gateway.register(profile).await.map_err(|err| match err {
            GatewayError::Rejected(detail) => AuthError::Validation(
                detail.summary_or("Registration failed. Please check your details and try again."),
            ),
            GatewayError::Transport(_) => AuthError::Transport,
        })
    }

    /// Clear the token and user synchronously. Calls already in flight
    /// may still complete in the name of the old session; calls issued
    /// after this omit the credential header.
    pub fn logout(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.credentials.clear();
        *self.user.lock() = None;
        debug!("signed out");
    }

    /// Resolve a persisted token to a user at startup. Resolution failure
    /// is treated as a logout.
    pub async fn restore(&self) -> Option<UserProfile> {
        if !self.credentials.is_present() {
            return None;
        }
        let epoch = self.epoch.load(Ordering::Acquire);
        match self.gateway.fetch_me().await {
            Ok(profile) => {
                if self.epoch.load(Ordering::Acquire) != epoch {
                    return None;
                }
                *self.user.lock() = Some(profile.clone());
                debug!(user_id = profile.id, "session restored");
                Some(profile)
            }
            Err(err) => {
                warn!(error = %err, "stored credential could not be resolved, signing out");
                self.logout();
                None
            }
        }
    }

    fn install_token(&self, token: CompactString) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        self.credentials.set(token);
        epoch
    }
}
