use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};

use crate::error::AuthError;
use crate::provider::{AuthProvider, AuthUser, SessionChange};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    user: AuthUser,
    password_hash: String,
}

/// In-memory identity provider: bcrypt-hashed credentials, one active
/// session, session-change callbacks. Used by tests and local runs.
#[derive(Default)]
pub struct MemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    session: RwLock<Option<AuthUser>>,
    subscribers: Mutex<Vec<Box<dyn Fn(SessionChange) + Send + Sync>>>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    async fn notify(&self, change: SessionChange) {
        for callback in self.subscribers.lock().await.iter() {
            callback(change.clone());
        }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::Provider(format!("Invalid email: {}", email)));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailInUse(email));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AuthError::Provider(format!("Hashing failed: {}", e)))?;

        let user = AuthUser {
            uid: uuid::Uuid::new_v4().to_string(),
            email: email.clone(),
            created_at: Utc::now(),
        };

        accounts.insert(
            email,
            Account {
                user: user.clone(),
                password_hash,
            },
        );

        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let email = email.trim().to_lowercase();

        let user = {
            let accounts = self.accounts.read().await;
            let account = accounts.get(&email).ok_or(AuthError::InvalidCredentials)?;

            let matches = bcrypt::verify(password, &account.password_hash)
                .map_err(|e| AuthError::Provider(format!("Verify failed: {}", e)))?;
            if !matches {
                return Err(AuthError::InvalidCredentials);
            }

            account.user.clone()
        };

        *self.session.write().await = Some(user.clone());
        self.notify(SessionChange::SignedIn(user.clone())).await;

        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let had_session = self.session.write().await.take().is_some();
        if had_session {
            self.notify(SessionChange::SignedOut).await;
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<AuthUser> {
        self.session.read().await.clone()
    }

    async fn on_session_change(&self, callback: Box<dyn Fn(SessionChange) + Send + Sync>) {
        self.subscribers.lock().await.push(callback);
    }
}
