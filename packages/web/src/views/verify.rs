use dioxus::prelude::*;

use crate::Route;

/// Verification pending, `/verify?email=...`.
#[component]
pub fn Verify(email: String) -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Check your inbox" }
            if email.is_empty() {
                p { class: "muted", "We sent you a verification link." }
            } else {
                p { class: "muted", "We sent a verification link to {email}." }
            }
            Link { to: Route::Documents {}, "Continue to your documents" }
        }
    }
}
