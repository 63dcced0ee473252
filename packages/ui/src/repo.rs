//! Shared backend constructor and context for all views.
//!
//! The app talks to the document store and the auth service only through the
//! [`store::DocumentStore`] and [`store::AuthService`] contracts. The bundled
//! build wires both to their in-memory implementations.

use dioxus::prelude::*;
use store::{MemoryAuth, MemoryStore, TypdConfig};

/// Document store used by the views.
pub type Documents = MemoryStore;

/// Auth service used by the views.
pub type Accounts = MemoryAuth;

/// Remote services plus the app configuration, provided as context.
#[derive(Clone)]
pub struct Backend {
    pub documents: Documents,
    pub auth: Accounts,
    pub config: TypdConfig,
}

/// Create the backend for this build.
pub fn make_backend(config: TypdConfig) -> Backend {
    Backend {
        documents: MemoryStore::new(),
        auth: MemoryAuth::new(),
        config,
    }
}

/// Get the backend provided by the app root.
pub fn use_backend() -> Backend {
    use_context::<Backend>()
}
