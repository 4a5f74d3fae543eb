//! Typed post predicates.
//!
//! Every public listing starts from [`PostPredicate::published`] and narrows
//! it with [`PostPredicate::and`]. Stores translate a predicate into their own
//! query language; [`PostPredicate::matches`] is the reference evaluation that
//! every translation must agree with.

use serde::{Deserialize, Serialize};

use crate::domain::Post;

/// A filter over the post collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostPredicate {
    /// `is_published = true`.
    Published,
    /// The post's category has this slug.
    CategorySlug(String),
    /// One of the post's tags has this slug.
    TagSlug(String),
    /// The post was created by this user id.
    CreatedBy(i64),
    /// Case-insensitive substring of title, excerpt, content or any tag name.
    Search(String),
    /// Conjunction; an empty list matches every post.
    All(Vec<PostPredicate>),
}

impl PostPredicate {
    /// Base predicate of every public listing.
    pub fn published() -> Self {
        Self::Published
    }

    /// Logical AND, flattening nested conjunctions.
    pub fn and(self, other: PostPredicate) -> Self {
        let mut parts = match self {
            Self::All(parts) => parts,
            single => vec![single],
        };
        match other {
            Self::All(more) => parts.extend(more),
            single => parts.push(single),
        }
        Self::All(parts)
    }

    /// Evaluate the predicate against a fully loaded post.
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Self::Published => post.is_published,
            Self::CategorySlug(slug) => post.category.as_ref().is_some_and(|c| &c.slug == slug),
            Self::TagSlug(slug) => post.tags.iter().any(|t| &t.slug == slug),
            Self::CreatedBy(user_id) => post.created_by.as_ref().is_some_and(|u| u.id == *user_id),
            Self::Search(term) => {
                let needle = term.to_lowercase();
                contains_ci(&post.title, &needle)
                    || contains_ci(&post.excerpt, &needle)
                    || contains_ci(&post.content, &needle)
                    || post.tags.iter().any(|t| contains_ci(&t.name, &needle))
            }
            Self::All(parts) => parts.iter().all(|p| p.matches(post)),
        }
    }
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
