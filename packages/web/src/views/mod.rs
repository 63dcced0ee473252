use dioxus::prelude::*;
use store::Destination;

use crate::Route;

mod login;
pub use login::Login;

mod join;
pub use join::Join;

mod documents;
pub use documents::Documents;

mod editor;
pub use editor::{Editor, EditorWithoutId};

mod verify;
pub use verify::Verify;

mod server_error;
pub use server_error::{PageNotFound, ServerError};

pub(crate) fn route_for(destination: Destination) -> Route {
    tracing::debug!("Navigating to {destination}");
    match destination {
        Destination::Login => Route::Login {
            email: String::new(),
        },
        Destination::Documents => Route::Documents {},
        Destination::Verify { email } => Route::Verify { email },
        Destination::ServerError => Route::ServerError {},
    }
}

/// Navigate to an in-app path such as an alert's action link.
pub(crate) fn follow_path(nav: Navigator, path: &str) {
    match path.parse::<Route>() {
        Ok(route) => {
            nav.push(route);
        }
        Err(e) => tracing::warn!("Ignoring link to unknown path {path}: {e}"),
    }
}
