//! Auth failure taxonomy with the user-facing messages each case maps to.

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered: {0}")]
    EmailInUse(String),

    #[error("Password too weak")]
    WeakPassword,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Message shown in the sign-in / sign-up form's error region.
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password. Please try again.",
            AuthError::EmailInUse(_) => {
                "This email is already registered. Please use a different email."
            }
            AuthError::WeakPassword => {
                "Password is too weak. Please use at least 6 characters."
            }
            AuthError::NotSignedIn => "Please log in to continue.",
            AuthError::Provider(_) => "Error creating account. Please try again.",
        }
    }
}

impl From<AuthError> for medvault_core::AppError {
    fn from(err: AuthError) -> Self {
        medvault_core::AppError::Unauthorized(err.client_message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_app_error_with_client_message() {
        let err: medvault_core::AppError = AuthError::NotSignedIn.into();
        assert!(matches!(err, medvault_core::AppError::Unauthorized(_)));
        assert!(err.to_string().contains("Please log in to continue."));
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.client_message(),
            "Invalid email or password. Please try again."
        );
        assert_eq!(
            AuthError::EmailInUse("a@b.com".to_string()).client_message(),
            "This email is already registered. Please use a different email."
        );
        assert_eq!(
            AuthError::WeakPassword.client_message(),
            "Password is too weak. Please use at least 6 characters."
        );
        assert_eq!(
            AuthError::Provider("timeout".to_string()).client_message(),
            "Error creating account. Please try again."
        );
    }

    #[test]
    fn test_internal_detail_not_in_client_message() {
        let err = AuthError::EmailInUse("a@b.com".to_string());
        assert!(err.to_string().contains("a@b.com"));
        assert!(!err.client_message().contains("a@b.com"));
    }
}
