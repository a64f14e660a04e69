use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::provider::{AuthProvider, AuthUser};

/// Explicit session context handed into every flow. Flows never look up the
/// current user ambiently; the caller resolves it once through the gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub email: String,
}

impl From<AuthUser> for SessionContext {
    fn from(user: AuthUser) -> Self {
        SessionContext {
            user_id: user.uid,
            email: user.email,
        }
    }
}

/// Guards protected flows: resolves the provider's current user or fails
/// with `NotSignedIn` (the redirect-to-login analogue).
pub struct SessionGate<'a> {
    provider: &'a dyn AuthProvider,
}

impl<'a> SessionGate<'a> {
    pub fn new(provider: &'a dyn AuthProvider) -> Self {
        Self { provider }
    }

    pub async fn require_user(&self) -> Result<SessionContext, AuthError> {
        match self.provider.current_user().await {
            Some(user) => Ok(SessionContext::from(user)),
            None => {
                tracing::debug!("Session gate denied: no signed-in user");
                Err(AuthError::NotSignedIn)
            }
        }
    }
}
