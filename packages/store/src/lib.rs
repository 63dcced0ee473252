//! Client-side core of typd: the document and account contracts, an in-memory
//! backend, and the UI-framework-free state machines behind the editor and the
//! join form.

pub mod alerts;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod join;
pub mod models;
pub mod repo;
pub mod route;
pub mod share;
pub mod time;

mod memory;
pub use memory::{MemoryAuth, MemoryStore};

pub use alerts::{alert_for, AlertAction, AlertKind, AlertMessage};
pub use config::{EditorSettings, ShareSettings, TypdConfig};
pub use debounce::Debouncer;
pub use editor::{
    mount_gate, ActionsPanel, ContentView, EditorSession, EditorState, EditorView, Phase, SaveStatus,
};
pub use error::{AuthError, AuthErrorCode, StoreError};
pub use join::{create_account, JoinForm};
pub use models::{Account, Document, DocumentData, DocumentPatch, Snapshot, Timestamp};
pub use repo::{AuthService, AuthStateStream, DocumentStore, Subscription};
pub use route::Destination;
pub use share::ShareLinks;
pub use time::{Clock, SystemClock};
