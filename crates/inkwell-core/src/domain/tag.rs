use serde::{Deserialize, Serialize};

/// Tag - many-to-many with posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl Tag {
    /// Create an unsaved tag; an empty slug is derived from the name.
    pub fn new(name: impl Into<String>, slug: &str) -> Self {
        let name = name.into();
        Self {
            id: 0,
            slug: super::ensure_slug(slug, &name),
            name,
        }
    }
}
