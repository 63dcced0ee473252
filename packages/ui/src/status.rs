use dioxus::prelude::*;
use store::Destination;

const EDITOR_CSS: Asset = asset!("/assets/editor.css");

#[component]
pub fn LoadingStatus(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: EDITOR_CSS }
        div {
            class: "view-placeholder",
            aria_busy: "true",
            "{label}"
        }
    }
}

/// Shown when a document does not exist or may not be read.
#[component]
pub fn DocumentNotFound(on_back: EventHandler<()>) -> Element {
    let back = Destination::Documents.path();

    rsx! {
        document::Link { rel: "stylesheet", href: EDITOR_CSS }
        div {
            class: "view-placeholder",
            h2 { "Document not found" }
            p { "It may have been deleted, or you may not have access to it." }
            a {
                href: "{back}",
                onclick: move |evt: Event<MouseData>| {
                    evt.prevent_default();
                    on_back.call(());
                },
                "Back to your documents"
            }
        }
    }
}
