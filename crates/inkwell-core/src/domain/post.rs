use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Tag, User};

/// Post entity - a blog article together with its resolved relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    /// Stored reference to the cover image, empty when unset.
    pub cover: String,
    /// Whether the cover is repeated at the top of the rendered content.
    pub cover_in_post_content: bool,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub created_by: Option<User>,
    pub updated_by: Option<User>,
}

impl Post {
    /// The post's tag with the given slug, if it carries one.
    pub fn tag_by_slug(&self, slug: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.slug == slug)
    }
}

/// Write model for creating or editing a post.
///
/// Relations are referenced by id; the store resolves them and stamps the
/// audit fields (`created_*` on insert, `updated_*` on every save).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    /// `0` inserts a new post, anything else updates that post.
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover: String,
    pub cover_in_post_content: bool,
    pub is_published: bool,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    /// The user performing the save.
    pub editor_id: Option<i64>,
}

impl PostDraft {
    /// A new unpublished draft; an empty slug is derived from the title.
    pub fn new(title: impl Into<String>, slug: &str) -> Self {
        let title = title.into();
        Self {
            id: 0,
            slug: super::ensure_slug(slug, &title),
            title,
            excerpt: String::new(),
            content: String::new(),
            cover: String::new(),
            cover_in_post_content: true,
            is_published: false,
            category_id: None,
            tag_ids: Vec::new(),
            editor_id: None,
        }
    }

    pub fn published(mut self) -> Self {
        self.is_published = true;
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<i64>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    pub fn edited_by(mut self, user_id: i64) -> Self {
        self.editor_id = Some(user_id);
        self
    }

    /// Draft that rewrites an existing post with that post's current values.
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover: post.cover.clone(),
            cover_in_post_content: post.cover_in_post_content,
            is_published: post.is_published,
            category_id: post.category.as_ref().map(|c| c.id),
            tag_ids: post.tags.iter().map(|t| t.id).collect(),
            editor_id: None,
        }
    }
}
