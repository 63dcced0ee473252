//! # Application configuration: `typd.toml`
//!
//! Tunables for the editor and the share links, read once at startup by the
//! web app.
//!
//! ## Structure
//!
//! ```toml
//! [editor]
//! debounce_ms = 1000         # quiet period before an edit is saved
//! status_refresh_secs = 30   # how often "Saved N ago" is re-derived
//!
//! [share]
//! base_url = "https://typd.org/-/"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`TypdConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`EditorSettings`] | Autosave debounce window and status refresh interval. |
//! | [`ShareSettings`] | Base URL that public links are built from. |
//!
//! Every field has a default, so a missing or partial file is equivalent to the
//! default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `typd.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypdConfig {
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub share: ShareSettings,
}

/// Editor timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Autosave debounce window in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Interval of the "Saved N ago" refresh in seconds.
    #[serde(default = "default_status_refresh")]
    pub status_refresh_secs: u64,
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_status_refresh() -> u64 {
    30
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            status_refresh_secs: default_status_refresh(),
        }
    }
}

impl EditorSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn status_refresh(&self) -> Duration {
        Duration::from_secs(self.status_refresh_secs)
    }
}

/// Public link settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://typd.org/-/".to_string()
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl TypdConfig {
    /// Builder method to set the autosave debounce window.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.editor.debounce_ms = ms;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "typd.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
