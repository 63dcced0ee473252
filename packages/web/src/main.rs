use dioxus::prelude::*;

use store::TypdConfig;
use ui::{make_backend, AuthProvider};
use views::{
    Documents, Editor, EditorWithoutId, Join, Login, PageNotFound, ServerError, Verify,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login?:email")]
    Login { email: String },
    #[route("/join?:email")]
    Join { email: String },
    #[route("/documents")]
    Documents {},
    #[route("/documents/:id")]
    Editor { id: String },
    #[route("/edit")]
    EditorWithoutId {},
    #[route("/verify?:email")]
    Verify { email: String },
    #[route("/500")]
    ServerError {},
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Bundled configuration, see `typd.toml` next to this crate's manifest.
const CONFIG_TOML: &str = include_str!("../typd.toml");

fn main() {
    dioxus::launch(App);
}

fn load_config() -> TypdConfig {
    match TypdConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {e}", TypdConfig::filename());
            TypdConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    use_context_provider(|| make_backend(load_config()));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/documents`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Documents {});
    rsx! {}
}
