//! Error types for the document store and the auth service.

use std::fmt;

use thiserror::Error;

/// Failures reported by a [`crate::DocumentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("permission denied for document {0}")]
    PermissionDenied(String),
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Coded failure reasons returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    OperationNotAllowed,
    NetworkRequestFailed,
    TooManyRequests,
    UserNotFound,
    WrongPassword,
    UserDisabled,
    Other(String),
}

impl AuthErrorCode {
    /// The wire code, e.g. `"auth/weak-password"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::InvalidEmail => "auth/invalid-email",
            Self::WeakPassword => "auth/weak-password",
            Self::OperationNotAllowed => "auth/operation-not-allowed",
            Self::NetworkRequestFailed => "auth/network-request-failed",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::UserDisabled => "auth/user-disabled",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coded auth failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({code})")]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub message: String,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes() {
        assert_eq!(AuthErrorCode::EmailAlreadyInUse.as_str(), "auth/email-already-in-use");
        assert_eq!(AuthErrorCode::UserDisabled.to_string(), "auth/user-disabled");
        assert_eq!(
            AuthErrorCode::Other("auth/quota-exceeded".to_string()).as_str(),
            "auth/quota-exceeded"
        );
    }

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::new(AuthErrorCode::WeakPassword, "Password should be at least 6 characters");
        assert_eq!(
            err.to_string(),
            "Password should be at least 6 characters (auth/weak-password)"
        );
    }
}
