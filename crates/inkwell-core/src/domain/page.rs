use serde::{Deserialize, Serialize};

/// Page entity - a standalone published document (about, contact, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    /// Must be set for the page to be publicly resolvable.
    pub is_published: bool,
}

impl Page {
    /// Create an unsaved, unpublished page.
    pub fn new(title: impl Into<String>, slug: &str, content: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: 0,
            slug: super::ensure_slug(slug, &title),
            title,
            content: content.into(),
            is_published: false,
        }
    }
}
