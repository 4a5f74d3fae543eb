use serde::{Deserialize, Serialize};

/// Category - a post belongs to at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl Category {
    /// Create an unsaved category; an empty slug is derived from the name.
    pub fn new(name: impl Into<String>, slug: &str) -> Self {
        let name = name.into();
        Self {
            id: 0,
            slug: super::ensure_slug(slug, &name),
            name,
        }
    }
}
