//! Maps auth error codes to the message shown in the form's alert region.

use crate::error::AuthErrorCode;

/// Severity of an alert, rendered as its colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Error,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Follow-up link offered with an alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertAction {
    pub url: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertMessage {
    pub kind: AlertKind,
    pub message: String,
    pub action: Option<AlertAction>,
}

impl AlertMessage {
    fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    fn with_action(mut self, url: String, text: &str) -> Self {
        self.action = Some(AlertAction {
            url,
            text: text.to_string(),
        });
        self
    }
}

/// Look up the alert for a failed sign-in or sign-up attempted with `email`.
pub fn alert_for(code: &AuthErrorCode, email: &str) -> AlertMessage {
    use AlertKind::{Error, Warning};

    match code {
        AuthErrorCode::EmailAlreadyInUse => {
            AlertMessage::new(Warning, format!("An account already exists for {email}."))
                .with_action(format!("/login?email={email}"), "Log in instead")
        }
        AuthErrorCode::InvalidEmail => {
            AlertMessage::new(Error, format!("{email} is not a valid email address."))
        }
        AuthErrorCode::WeakPassword => AlertMessage::new(
            Error,
            "Password is too weak, use at least 6 characters.",
        ),
        AuthErrorCode::OperationNotAllowed => {
            AlertMessage::new(Error, "Creating new accounts is currently disabled.")
        }
        AuthErrorCode::NetworkRequestFailed => AlertMessage::new(
            Warning,
            "Could not reach the server. Check your connection and try again.",
        ),
        AuthErrorCode::TooManyRequests => AlertMessage::new(
            Warning,
            "Too many attempts. Please wait a moment and try again.",
        ),
        AuthErrorCode::UserNotFound => {
            AlertMessage::new(Warning, format!("No account found for {email}."))
                .with_action(format!("/join?email={email}"), "Create an account")
        }
        AuthErrorCode::WrongPassword => AlertMessage::new(Error, "Incorrect password."),
        AuthErrorCode::UserDisabled => {
            AlertMessage::new(Error, "This account has been disabled.")
        }
        AuthErrorCode::Other(_) => {
            AlertMessage::new(Error, "Something went wrong. Please try again.")
        }
    }
}
