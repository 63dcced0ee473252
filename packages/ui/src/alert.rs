use dioxus::prelude::*;
use store::AlertMessage;

const FORMS_CSS: Asset = asset!("/assets/forms.css");

/// Dismissable alert box. `on_follow` receives the action link's path.
#[component]
pub fn AlertRegion(
    #[props(!optional)] alert: Option<AlertMessage>,
    on_dismiss: EventHandler<()>,
    on_follow: EventHandler<String>,
) -> Element {
    let Some(alert) = alert else {
        return rsx! {};
    };
    let kind = alert.kind.as_str();
    let follow = alert.action.as_ref().map(|action| action.url.clone());

    rsx! {
        document::Link { rel: "stylesheet", href: FORMS_CSS }
        div {
            class: "alert alert--{kind}",
            role: "alert",
            span {
                "{alert.message}"
                if let Some(action) = alert.action.as_ref() {
                    " "
                    a {
                        href: "{action.url}",
                        onclick: move |evt: Event<MouseData>| {
                            evt.prevent_default();
                            if let Some(url) = follow.clone() {
                                on_follow.call(url);
                            }
                        },
                        "{action.text}"
                    }
                }
            }
            button {
                class: "alert-dismiss",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
