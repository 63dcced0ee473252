//! Login page view with an email/password form.

use dioxus::prelude::*;
use store::{alert_for, AlertMessage, AuthService};
use ui::{use_auth, use_backend, AlertRegion};

use super::follow_path;
use crate::Route;

/// Login page component, `/login?email=...`.
#[component]
pub fn Login(email: String) -> Element {
    let auth = use_auth();
    let backend = use_backend();
    let nav = use_navigator();
    let mut email = use_signal(move || email);
    let mut password = use_signal(String::new);
    let mut alert = use_signal(|| Option::<AlertMessage>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the document list
    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_some() {
            nav.replace(Route::Documents {});
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        loading.set(true);
        alert.set(None);
        let service = backend.auth.clone();
        spawn(async move {
            let address = email().trim().to_string();
            match service.sign_in(&address, &password()).await {
                Ok(account) => {
                    tracing::info!("Signed in as {}", account.email);
                    nav.replace(Route::Documents {});
                }
                Err(e) => {
                    tracing::warn!("Sign-in failed: {e}");
                    loading.set(false);
                    alert.set(Some(alert_for(&e.code, &address)));
                }
            }
        });
    };

    rsx! {
        div {
            class: "page",

            h1 { "Log in" }
            p { class: "muted", "Welcome back to typd." }

            form {
                onsubmit: handle_login,
                class: "stack",

                AlertRegion {
                    alert: alert(),
                    on_dismiss: move |_| alert.set(None),
                    on_follow: move |path: String| follow_path(nav, &path),
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    required: true,
                    disabled: loading(),
                    value: "{email}",
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    required: true,
                    disabled: loading(),
                    value: "{password}",
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "action primary",
                    disabled: loading(),
                    if loading() { "Logging in..." } else { "Log in" }
                }
            }

            p {
                class: "muted",
                "New to typd? "
                Link { to: Route::Join { email: email() }, "Create an account" }
            }
        }
    }
}
