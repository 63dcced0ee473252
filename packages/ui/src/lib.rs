//! This crate contains all shared UI for the workspace.

mod repo;
pub use repo::{make_backend, use_backend, Accounts, Backend, Documents};

pub mod views;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod alert;
pub use alert::AlertRegion;

mod status;
pub use status::{DocumentNotFound, LoadingStatus};

pub mod markdown;
pub use markdown::{markdown_to_html, RenderMarkdown};

mod document_editor;
pub use document_editor::DocumentEditor;

mod account_join;
pub use account_join::AccountJoin;
