//! Public and social share links for a shared document.

/// Links shown in the editor's actions panel while a document is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLinks {
    pub public: String,
    pub twitter: String,
    pub facebook: String,
}

impl ShareLinks {
    /// Build the links for `id` under `base` (e.g. `https://typd.org/-/`).
    pub fn new(base: &str, id: &str) -> Self {
        let public = format!("{base}{id}");
        Self {
            twitter: format!("https://twitter.com/intent/tweet?text={public}"),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={public}"),
            public,
        }
    }
}
