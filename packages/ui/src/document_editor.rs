use dioxus::prelude::*;
use store::{mount_gate, Destination, EditorSession, EditorState, EditorView, SystemClock};

use crate::markdown::RenderMarkdown;
use crate::repo::{use_backend, Documents};
use crate::status::{DocumentNotFound, LoadingStatus};
use crate::use_auth;
use crate::views::ConfirmDialog;

const EDITOR_CSS: Asset = asset!("/assets/editor.css");

/// Live editor for one document.
///
/// Waits for the auth state, then either asks the host to navigate away
/// (no account, no id) or opens an [`EditorSession`] that lives until the
/// component unmounts. Give the component a `key` per document id so a
/// route change remounts it.
#[component]
pub fn DocumentEditor(
    #[props(!optional)] doc_id: Option<String>,
    on_navigate: EventHandler<Destination>,
) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut session = use_signal(|| Option::<EditorSession<Documents>>::None);
    let view_state = use_signal(|| Option::<EditorState>::None);

    use_effect(move || {
        let auth = auth();
        if auth.loading || session.peek().is_some() {
            return;
        }
        match mount_gate(auth.user.as_ref(), doc_id.as_deref()) {
            Err(destination) => on_navigate.call(destination),
            Ok(id) => {
                let editor = EditorSession::new(
                    backend.documents.clone(),
                    SystemClock,
                    &backend.config,
                    &id,
                    move |state: &EditorState| {
                        let mut view_state = view_state;
                        view_state.set(Some(state.clone()));
                    },
                );
                spawn(editor.open());
                spawn(editor.run_status_ticker());
                session.set(Some(editor));
            }
        }
    });

    use_drop(move || {
        if let Some(editor) = session.peek().as_ref() {
            editor.teardown();
        }
    });

    let editor = move || session.peek().clone();

    let state = view_state();
    let view = state.as_ref().map_or(EditorView::Loading, EditorState::view);

    let content = match view {
        EditorView::NotFound => rsx! {
            DocumentNotFound { on_back: move |_| on_navigate.call(Destination::Documents) }
        },
        EditorView::Loading => rsx! {
            LoadingStatus {}
        },
        EditorView::Content(content) => {
            let preview = content.preview;
            rsx! {
                div {
                    class: "status",
                    aria_live: "polite",
                    "{content.status_message}"
                }
                input {
                    class: "title",
                    r#type: "text",
                    placeholder: "Untitled",
                    value: "{content.doc.title}",
                    oninput: move |evt: FormEvent| {
                        if let Some(editor) = editor() {
                            spawn(editor.edit_title(evt.value()));
                        }
                    },
                }
                if preview {
                    RenderMarkdown { source: content.doc.body.clone() }
                } else {
                    textarea {
                        class: "body",
                        placeholder: "Start writing...",
                        value: "{content.doc.body}",
                        oninput: move |evt: FormEvent| {
                            if let Some(editor) = editor() {
                                spawn(editor.edit_body(evt.value()));
                            }
                        },
                    }
                }
                div {
                    class: "toolbar",
                    button {
                        class: "action",
                        onclick: move |_| {
                            if let Some(editor) = editor() {
                                editor.toggle_preview();
                            }
                        },
                        if preview { "Edit" } else { "Preview" }
                    }
                    button {
                        class: "action",
                        onclick: move |_| {
                            if let Some(editor) = editor() {
                                editor.toggle_actions();
                            }
                        },
                        "{content.actions_label}"
                    }
                }
                if let Some(actions) = content.actions {
                    div {
                        class: "toolbar",
                        button {
                            class: "action",
                            onclick: move |_| {
                                if let Some(editor) = editor() {
                                    spawn(editor.toggle_shared());
                                }
                            },
                            "{actions.share_label}"
                        }
                        if let Some(links) = actions.links {
                            div {
                                class: "links",
                                a { href: "{links.public}", target: "_blank", rel: "noopener", "Public link" }
                                a { href: "{links.twitter}", target: "_blank", rel: "noopener", "Twitter" }
                                a { href: "{links.facebook}", target: "_blank", rel: "noopener", "Facebook" }
                            }
                        }
                        if actions.can_delete {
                            button {
                                class: "action delete",
                                onclick: move |_| {
                                    if let Some(editor) = editor() {
                                        editor.request_delete();
                                    }
                                },
                                "Delete"
                            }
                        }
                    }
                }
                if content.confirming_delete {
                    ConfirmDialog {
                        message: "Delete this document? This cannot be undone.".to_string(),
                        confirm_label: "Delete".to_string(),
                        on_cancel: move |_| {
                            if let Some(editor) = editor() {
                                editor.cancel_delete();
                            }
                        },
                        on_confirm: move |_| {
                            if let Some(editor) = editor() {
                                let deleted = editor.confirm_delete();
                                spawn(async move {
                                    if let Some(destination) = deleted.await {
                                        on_navigate.call(destination);
                                    }
                                });
                            }
                        },
                    }
                }
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: EDITOR_CSS }
        div {
            class: "editor",
            {content}
        }
    }
}
