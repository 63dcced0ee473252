//! Authentication context and hooks for the UI.

use dioxus::prelude::*;
use futures::StreamExt;
use store::{Account, AuthService};

use crate::repo::use_backend;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<Account>,
    /// True until the auth service reports for the first time.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that follows the auth service's state changes.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let backend = use_backend();
    let mut auth_state = use_signal(AuthState::default);

    // Listen for sign-in/sign-out for as long as the provider is mounted
    use_effect(move || {
        let auth = backend.auth.clone();
        spawn(async move {
            let mut changes = auth.on_auth_state_changed();
            while let Some(user) = changes.next().await {
                tracing::debug!(
                    "Auth state changed: {}",
                    user.as_ref().map_or("signed out", |u| u.uid.as_str())
                );
                auth_state.set(AuthState {
                    user,
                    loading: false,
                });
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to sign the current user out.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let backend = use_backend();

    let onclick = move |_| {
        let auth = backend.auth.clone();
        async move {
            auth.sign_out().await;
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
