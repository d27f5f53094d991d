//! Slug generation
//!
//! Pure transformation from a display name to a URL-safe identifier.
//! Collisions are not deduplicated here; the UNIQUE constraint on
//! `categories.slug` is the source of truth and surfaces as a conflict.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derive a URL-safe slug from a display name.
///
/// Lowercase, NFD-decompose accented characters and drop the diacritical
/// marks, collapse every run of non-alphanumeric characters into a single
/// hyphen, and strip leading/trailing hyphens. Deterministic and
/// idempotent: `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
