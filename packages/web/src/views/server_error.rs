use dioxus::prelude::*;

use crate::Route;

/// Generic failure page, `/500`.
#[component]
pub fn ServerError() -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Something went wrong" }
            p { class: "muted", "Please try again in a moment." }
            Link { to: Route::Documents {}, "Back to your documents" }
        }
    }
}

#[component]
pub fn PageNotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "page",
            h1 { "Page not found" }
            p { class: "muted", "Nothing lives at /{path}." }
            Link { to: Route::Documents {}, "Back to your documents" }
        }
    }
}
