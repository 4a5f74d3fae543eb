//! Slug derivation for entities saved without an explicit slug.

use uuid::Uuid;

/// Length of the random suffix appended to derived slugs.
const SUFFIX_LEN: usize = 6;

/// Slugify `text` and append a short random suffix, e.g. `my-title-3f9a1c`.
///
/// Falls back to the suffix alone when `text` contains nothing sluggable.
pub fn slugify_new(text: &str) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_string();
    let base = slug::slugify(text);
    if base.is_empty() {
        suffix
    } else {
        format!("{base}-{suffix}")
    }
}

/// Keep a non-blank slug as-is (trimmed), otherwise derive one from `source`.
pub fn ensure_slug(slug: &str, source: &str) -> String {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        slugify_new(source)
    } else {
        trimmed.to_string()
    }
}
