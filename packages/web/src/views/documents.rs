//! Document list for the signed-in account.

use dioxus::prelude::*;
use store::time::from_now;
use store::{Clock, DocumentData, DocumentStore, SystemClock};
use ui::{use_auth, use_backend, LoadingStatus, LogoutButton};

use crate::Route;

fn display_title(data: &DocumentData) -> String {
    match data.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => "Untitled".to_string(),
    }
}

#[component]
pub fn Documents() -> Element {
    let auth = use_auth();
    let backend = use_backend();
    let nav = use_navigator();
    let mut creating = use_signal(|| false);

    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_none() {
            nav.replace(Route::Login {
                email: String::new(),
            });
        }
    });

    let documents = backend.documents.clone();
    let listing = use_resource(move || {
        let documents = documents.clone();
        async move {
            let owner = auth().user.map(|user| user.uid)?;
            match documents.list(&owner).await {
                Ok(docs) => Some(docs),
                Err(e) => {
                    tracing::error!("Failed to list documents: {e}");
                    None
                }
            }
        }
    });

    let handle_new = move |_| {
        let Some(owner) = auth().user.map(|user| user.uid) else {
            return;
        };
        if creating() {
            return;
        }
        creating.set(true);
        let documents = backend.documents.clone();
        spawn(async move {
            match documents.create(&owner, "").await {
                Ok(id) => {
                    tracing::info!("Created document {id}");
                    nav.push(Route::Editor { id });
                }
                Err(e) => tracing::error!("Failed to create document: {e}"),
            }
            creating.set(false);
        });
    };

    let now = SystemClock.now();

    rsx! {
        div {
            class: "page",
            h1 { "Your documents" }
            div {
                class: "toolbar",
                button {
                    class: "action primary",
                    disabled: creating(),
                    onclick: handle_new,
                    "New document"
                }
                LogoutButton { class: "action".to_string() }
            }
            match &*listing.read_unchecked() {
                Some(Some(docs)) if docs.is_empty() => rsx! {
                    p { class: "muted", "No documents yet." }
                },
                Some(Some(docs)) => rsx! {
                    ul {
                        class: "document-list",
                        for (id, data) in docs.iter() {
                            li {
                                key: "{id}",
                                Link {
                                    to: Route::Editor { id: id.clone() },
                                    {display_title(data)}
                                }
                                if let Some(updated) = data.updated {
                                    span { class: "muted", {from_now(updated, now)} }
                                }
                            }
                        }
                    }
                },
                Some(None) => rsx! {
                    p { class: "muted", "Could not load your documents." }
                },
                None => rsx! {
                    LoadingStatus {}
                },
            }
        }
    }
}
