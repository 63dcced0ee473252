//! "Create a new account" form.

use dioxus::prelude::*;
use store::{create_account, Destination, JoinForm};

use crate::alert::AlertRegion;
use crate::repo::use_backend;

const FORMS_CSS: Asset = asset!("/assets/forms.css");

/// Account creation form. Successful sign-ups end in `on_navigate`; alert
/// action links are passed to `on_follow` as paths.
#[component]
pub fn AccountJoin(
    #[props(!optional)] email: Option<String>,
    on_navigate: EventHandler<Destination>,
    on_follow: EventHandler<String>,
) -> Element {
    let backend = use_backend();
    let mut form = use_signal(move || JoinForm::new(email));

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some((email, password)) = form.write().begin_submit() else {
            return;
        };
        let auth = backend.auth.clone();
        spawn(async move {
            match create_account(&auth, email.trim(), &password).await {
                Ok(destination) => {
                    tracing::info!("Created account for {email}");
                    on_navigate.call(destination);
                }
                Err(e) => {
                    tracing::warn!("Account creation failed: {e}");
                    form.write().fail(&e);
                }
            }
        });
    };

    let current = form();
    let loading = current.loading;

    rsx! {
        document::Link { rel: "stylesheet", href: FORMS_CSS }
        div {
            class: "join",
            h1 { "Create a new account" }

            form {
                onsubmit: handle_submit,
                class: "join-form",

                AlertRegion {
                    alert: current.alert.clone(),
                    on_dismiss: move |_| form.write().dismiss_alert(),
                    on_follow: move |path: String| on_follow.call(path),
                }

                label {
                    r#for: "join-email",
                    "Email"
                }
                input {
                    id: "join-email",
                    r#type: "email",
                    required: true,
                    autocomplete: "email",
                    disabled: loading,
                    value: "{current.email}",
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }

                label {
                    r#for: "join-password",
                    "Password"
                }
                div {
                    class: "password-row",
                    input {
                        id: "join-password",
                        r#type: current.password_input_type(),
                        required: true,
                        minlength: "6",
                        autocomplete: "new-password",
                        disabled: loading,
                        value: "{current.password}",
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                    button {
                        r#type: "button",
                        class: "action",
                        disabled: loading,
                        onclick: move |_| form.write().toggle_password_visibility(),
                        if current.password_visible { "Hide" } else { "Show" }
                    }
                }

                button {
                    r#type: "submit",
                    class: "action primary",
                    disabled: loading,
                    if loading { "Creating account..." } else { "Create account" }
                }
            }
        }
    }
}
