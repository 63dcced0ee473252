//! Navigation targets produced by the editor and the join flow.

use std::fmt;

/// Where the app should go next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Login,
    Documents,
    /// Verification-pending page for a freshly created account.
    Verify { email: String },
    /// Generic failure page.
    ServerError,
}

impl Destination {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Documents => "/documents".to_string(),
            Self::Verify { email } => format!("/verify?email={email}"),
            Self::ServerError => "/500".to_string(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
