use dioxus::prelude::*;
use ui::DocumentEditor;

use super::route_for;

/// `/documents/:id`
#[component]
pub fn Editor(id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        DocumentEditor {
            key: "{id}",
            doc_id: Some(id.clone()),
            on_navigate: move |destination| {
                nav.replace(route_for(destination));
            },
        }
    }
}

/// `/edit` without a document id. The editor redirects to the list.
#[component]
pub fn EditorWithoutId() -> Element {
    let nav = use_navigator();

    rsx! {
        DocumentEditor {
            doc_id: None,
            on_navigate: move |destination| {
                nav.replace(route_for(destination));
            },
        }
    }
}
