//! Tag-string parsing, formatting, diffing, and slug generation.
//!
//! Entities carry their tags as a single comma-separated string attribute
//! ("rust, databases, tooling"). These helpers are the pure half of the
//! reconciler: they turn that attribute into name lists and compute the
//! minimal add/remove delta between an old and a new value. Persistence
//! lives in `entag-db`.

use std::collections::HashSet;

use crate::models::TagDelta;

/// Maximum tag name length in characters.
pub const MAX_TAG_NAME_LEN: usize = 100;

/// Parse a comma-separated tag string into a list of names.
///
/// Splits on commas with optional surrounding whitespace, trims the input,
/// and drops empty entries. Source order is preserved and duplicates are
/// kept; set semantics are applied later by [`diff_tags`].
///
/// # Examples
///
/// ```
/// use entag_core::parse_tag_string;
///
/// assert_eq!(parse_tag_string("a, b ,c"), vec!["a", "b", "c"]);
/// assert!(parse_tag_string("  ,, ").is_empty());
/// ```
pub fn parse_tag_string(tags: &str) -> Vec<String> {
    tags.trim()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Join tag names back into the canonical attribute form, `", "` separated.
///
/// Inverse of [`parse_tag_string`] only up to whitespace and empty-entry
/// normalization; not a strict round-trip.
pub fn format_tag_string<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compute the set difference between an old and a new tag list.
///
/// `added = new \ old`, `removed = old \ new`, by exact string equality.
/// Both sides are deduplicated and keep first-occurrence order. The two
/// lists are disjoint by construction.
pub fn diff_tags<S: AsRef<str>>(old: &[S], new: &[S]) -> TagDelta {
    let old_set: HashSet<&str> = old.iter().map(|s| s.as_ref()).collect();
    let new_set: HashSet<&str> = new.iter().map(|s| s.as_ref()).collect();

    let mut added = Vec::new();
    let mut seen = HashSet::new();
    for name in new {
        let name = name.as_ref();
        if !old_set.contains(name) && seen.insert(name) {
            added.push(name.to_string());
        }
    }

    let mut removed = Vec::new();
    let mut seen = HashSet::new();
    for name in old {
        let name = name.as_ref();
        if !new_set.contains(name) && seen.insert(name) {
            removed.push(name.to_string());
        }
    }

    TagDelta { added, removed }
}

/// Convenience wrapper: parse both attribute values and diff them.
pub fn diff_tag_strings(old_tags: &str, new_tags: &str) -> TagDelta {
    diff_tags(&parse_tag_string(old_tags), &parse_tag_string(new_tags))
}

/// Generate a URL-safe kebab-case slug from a tag name.
///
/// Lowercases, maps every non-alphanumeric run to a single hyphen, and
/// strips leading/trailing hyphens. Deterministic: equal names always
/// produce equal slugs.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Validate a tag name before it reaches storage.
///
/// Rules:
/// - Non-empty after trimming
/// - At most [`MAX_TAG_NAME_LEN`] characters
/// - No commas (the attribute separator)
///
/// Returns Ok(()) if valid, Err with message if invalid.
pub fn validate_tag_name(name: &str) -> std::result::Result<(), String> {
    if name.trim().is_empty() {
        return Err("Tag name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_TAG_NAME_LEN {
        return Err(format!(
            "Tag name must be {} characters or less",
            MAX_TAG_NAME_LEN
        ));
    }
    if name.contains(',') {
        return Err("Tag name cannot contain commas".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse_tag_string("a, b, c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_irregular_whitespace() {
        assert_eq!(
            parse_tag_string("  rust ,databases,  tooling  "),
            vec!["rust", "databases", "tooling"]
        );
    }

    #[test]
    fn test_parse_drops_empty_entries() {
        assert_eq!(parse_tag_string("a,,b, ,c,"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_empty_and_whitespace_only() {
        assert!(parse_tag_string("").is_empty());
        assert!(parse_tag_string("   ").is_empty());
        assert!(parse_tag_string(" , , ").is_empty());
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        assert_eq!(parse_tag_string("b, a, b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_format_joins_with_comma_space() {
        assert_eq!(format_tag_string(&["a", "b", "c"]), "a, b, c");
        assert_eq!(format_tag_string::<&str>(&[]), "");
    }

    #[test]
    fn test_parse_format_parse_is_idempotent() {
        for s in ["a, b, c", "  x ,, y ", "", "solo", "dup, dup"] {
            let once = parse_tag_string(s);
            let again = parse_tag_string(&format_tag_string(&once));
            assert_eq!(once, again, "round trip changed parse of {:?}", s);
        }
    }

    #[test]
    fn test_diff_disjoint() {
        let delta = diff_tags(&["a", "b"], &["b", "c"]);
        assert_eq!(delta.added, vec!["c"]);
        assert_eq!(delta.removed, vec!["a"]);
        for name in &delta.added {
            assert!(!delta.removed.contains(name));
        }
    }

    #[test]
    fn test_diff_identical_sets_is_empty() {
        let delta = diff_tags(&["a", "b"], &["b", "a"]);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_diff_from_empty() {
        let delta = diff_tags::<&str>(&[], &["x", "y"]);
        assert_eq!(delta.added, vec!["x", "y"]);
        assert!(delta.removed.is_empty());
    }

    #[test]
    fn test_diff_to_empty() {
        let delta = diff_tags::<&str>(&["x", "y"], &[]);
        assert!(delta.added.is_empty());
        assert_eq!(delta.removed, vec!["x", "y"]);
    }

    #[test]
    fn test_diff_dedupes_while_keeping_order() {
        let delta = diff_tags(&["a", "a", "b"], &["c", "c", "b", "d"]);
        assert_eq!(delta.added, vec!["c", "d"]);
        assert_eq!(delta.removed, vec!["a"]);
    }

    #[test]
    fn test_diff_tag_strings_scenario() {
        // Entity saved with "a, b" then updated to "b, c".
        let delta = diff_tag_strings("a, b", "b, c");
        assert_eq!(delta.added, vec!["c"]);
        assert_eq!(delta.removed, vec!["a"]);
    }

    #[test]
    fn test_diff_tag_strings_delete_path() {
        // Entity deleted while holding "a, b": new value is empty.
        let delta = diff_tag_strings("a, b", "");
        assert!(delta.added.is_empty());
        assert_eq!(delta.removed, vec!["a", "b"]);
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Rust"), "rust");
        assert_eq!(slugify("Machine Learning"), "machine-learning");
    }

    #[test]
    fn test_slugify_collapses_symbol_runs() {
        assert_eq!(slugify("C++ / systems!"), "c-systems");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn test_slugify_deterministic() {
        assert_eq!(slugify("Data Bases"), slugify("Data Bases"));
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_tag_name("").is_err());
        assert!(validate_tag_name("   ").is_err());
    }

    #[test]
    fn test_validate_rejects_overlong() {
        let long = "x".repeat(MAX_TAG_NAME_LEN + 1);
        assert!(validate_tag_name(&long).is_err());
        let ok = "x".repeat(MAX_TAG_NAME_LEN);
        assert!(validate_tag_name(&ok).is_ok());
    }

    #[test]
    fn test_validate_rejects_commas() {
        assert!(validate_tag_name("a,b").is_err());
    }

    #[test]
    fn test_validate_accepts_spaces_and_unicode() {
        assert!(validate_tag_name("machine learning").is_ok());
        assert!(validate_tag_name("café").is_ok());
    }
}
