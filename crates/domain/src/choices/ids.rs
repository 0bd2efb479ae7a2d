//! Deterministic identifiers for synthesized choices.
//!
//! Choice ids become primary keys of later choice-selection records, so they
//! must be reproducible from the same input and bounded in length. All
//! functions here are pure and total: any input string, including the empty
//! string, produces a usable id.

/// Hard cap on the description-derived part of a nested choice id.
pub const NESTED_DESCRIPTION_MAX_LEN: usize = 30;

const NESTED_PREFIX: &str = "nested";

/// Lower-case `text`, keeping ASCII letters and digits.
///
/// Runs of whitespace, hyphens, underscores and slashes collapse into a single
/// `separator`; every other character is stripped. Leading and trailing
/// separators never appear.
///
/// ```
/// use charforge_domain::choices::slug;
///
/// assert_eq!(slug("Artisan's Tools", '-'), "artisans-tools");
/// assert_eq!(slug("  a martial weapon ", '_'), "a_martial_weapon");
/// assert_eq!(slug("?!", '_'), "");
/// ```
pub fn slug(text: &str, separator: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(separator);
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || matches!(c, '-' | '_' | '/') {
            pending_separator = true;
        }
    }

    out
}

/// `prefix` joined to the underscore slug of `text`, the slug cut to `max_len`.
///
/// Returns `prefix` alone when `text` has nothing sluggable in it.
pub fn bounded_id(prefix: &str, text: &str, max_len: usize) -> String {
    let slug = slug(text, '_');
    // Slugs are ASCII, so byte slicing lands on char boundaries.
    let truncated = slug[..slug.len().min(max_len)].trim_end_matches('_');

    match (prefix.is_empty(), truncated.is_empty()) {
        (_, true) => prefix.to_string(),
        (true, false) => truncated.to_string(),
        (false, false) => format!("{prefix}_{truncated}"),
    }
}

/// Id of a top-level choice: `{base_id}_{field}_{index + 1}`.
pub fn top_level_choice_id(base_id: &str, field: &str, index: usize) -> String {
    format!("{}_{}_{}", base_id, field, index.saturating_add(1))
}

/// Id of a nested choice synthesized from its description:
/// `nested_{category_id}_{slug(description)}` with the slug capped at
/// [`NESTED_DESCRIPTION_MAX_LEN`].
///
/// Only unique within one base entity: two long descriptions sharing their
/// first 30 characters map to the same id.
pub fn nested_choice_id(category_id: &str, description: &str) -> String {
    let prefix = if category_id.is_empty() {
        NESTED_PREFIX.to_string()
    } else {
        format!("{NESTED_PREFIX}_{category_id}")
    };
    bounded_id(&prefix, description, NESTED_DESCRIPTION_MAX_LEN)
}
