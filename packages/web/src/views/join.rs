use dioxus::prelude::*;
use ui::AccountJoin;

use super::{follow_path, route_for};

/// Account creation page, `/join?email=...`.
#[component]
pub fn Join(email: String) -> Element {
    let nav = use_navigator();

    rsx! {
        AccountJoin {
            email: (!email.is_empty()).then(|| email.clone()),
            on_navigate: move |destination| {
                nav.push(route_for(destination));
            },
            on_follow: move |path: String| follow_path(nav, &path),
        }
        p {
            class: "page muted",
            "Already have an account? "
            Link { to: crate::Route::Login { email: email.clone() }, "Log in" }
        }
    }
}
