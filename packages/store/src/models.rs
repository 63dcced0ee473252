//! # Domain models for documents and accounts
//!
//! Defines the records exchanged with the remote document store and auth
//! service. Remote data is kept separate from the editor's local cache so the
//! "fields may be absent" shape of the backend never leaks into the UI.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`DocumentData`] | The raw fields of a remote document record. Every field is optional because the backend stores whatever was last merge-written. |
//! | [`Snapshot`] | A point-in-time read of one record: its id and, if the record exists, its [`DocumentData`]. |
//! | [`Document`] | The editor's local cached copy, with defaults filled in (`shared` is `false` when absent). |
//! | [`DocumentPatch`] | A merge-write payload. Only the `Some` fields are written; `touch` asks the store to stamp `updated` with its own clock. |
//! | [`Account`] | A signed-in (or freshly created) account. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned point in time.
pub type Timestamp = DateTime<Utc>;

/// Fields of a remote document record, exactly as stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
    /// Last write time, assigned by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
    /// Uid of the account that created the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl DocumentData {
    /// Apply a merge-write. Fields absent from the patch are left untouched.
    pub fn merge(&mut self, patch: &DocumentPatch, now: Timestamp) {
        if let Some(title) = &patch.title {
            self.title = Some(title.clone());
        }
        if let Some(body) = &patch.body {
            self.body = Some(body.clone());
        }
        if let Some(shared) = patch.shared {
            self.shared = Some(shared);
        }
        if patch.touch {
            self.updated = Some(now);
        }
    }
}

/// A read of one record. `data` is `None` when the record does not exist.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub data: Option<DocumentData>,
}

/// The editor's local copy of a document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub body: String,
    pub shared: bool,
}

impl Document {
    pub fn from_data(id: &str, data: &DocumentData) -> Self {
        Self {
            id: id.to_string(),
            title: data.title.clone().unwrap_or_default(),
            body: data.body.clone().unwrap_or_default(),
            shared: data.shared.unwrap_or(false),
        }
    }
}

/// Partial update sent with a merge-write.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub shared: Option<bool>,
    /// Stamp `updated` with the server's clock.
    pub touch: bool,
}

impl DocumentPatch {
    /// Title and body, as written by the debounced autosave.
    pub fn content(title: &str, body: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
            shared: None,
            touch: true,
        }
    }

    /// Sharing flag, as written by the share toggle.
    pub fn sharing(shared: bool) -> Self {
        Self {
            shared: Some(shared),
            touch: true,
            ..Self::default()
        }
    }
}

/// An account known to the auth service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
}
