//! Account creation: the join form's state and its submit flow.

use crate::alerts::{alert_for, AlertMessage};
use crate::error::AuthError;
use crate::repo::AuthService;
use crate::route::Destination;

/// State behind the "Create a new account" form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoinForm {
    pub email: String,
    pub password: String,
    pub password_visible: bool,
    pub alert: Option<AlertMessage>,
    /// Disables every input and the submit button.
    pub loading: bool,
}

impl JoinForm {
    /// A fresh form, optionally pre-filled from the `email` query parameter.
    pub fn new(email: Option<String>) -> Self {
        Self {
            email: email.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn password_input_type(&self) -> &'static str {
        if self.password_visible {
            "text"
        } else {
            "password"
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// Start a submission. Returns the credentials to send, or `None` when a
    /// submission is already running.
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some((self.email.clone(), self.password.clone()))
    }

    /// Record a failed account creation.
    pub fn fail(&mut self, error: &AuthError) {
        self.loading = false;
        self.alert = Some(alert_for(&error.code, &self.email));
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

/// Create the account and send its verification mail.
///
/// A failed creation is returned to the caller for the alert region. Once the
/// account exists the flow always ends in a navigation: the verification page
/// on success, the generic error page if the mail could not be sent.
pub async fn create_account<A: AuthService>(
    auth: &A,
    email: &str,
    password: &str,
) -> Result<Destination, AuthError> {
    let account = auth.create_account(email, password).await?;
    match auth.send_verification_email(&account).await {
        Ok(()) => Ok(Destination::Verify {
            email: account.email,
        }),
        Err(e) => {
            tracing::error!("Failed to send verification email to {}: {e}", account.email);
            Ok(Destination::ServerError)
        }
    }
}
