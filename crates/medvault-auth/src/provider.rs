use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Authenticated user as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider-assigned opaque id; used as the report owner reference
    pub uid: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Session transition delivered to subscribers.
#[derive(Debug, Clone)]
pub enum SessionChange {
    SignedIn(AuthUser),
    SignedOut,
}

/// Identity-provider interface: credential operations, current-user lookup,
/// and a subscription for session changes.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The currently signed-in user, if any.
    async fn current_user(&self) -> Option<AuthUser>;

    /// Register a callback invoked on every sign-in and sign-out.
    async fn on_session_change(&self, callback: Box<dyn Fn(SessionChange) + Send + Sync>);
}
