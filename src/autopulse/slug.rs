//! Slug and identifier assignment.
//!
//! Slugs are derived from titles and are *not* checked for uniqueness here;
//! see [`crate::store::ArticleStore::duplicate_slugs`] for reporting collisions.

use uuid::Uuid;

/// Lower-cases the title, turns whitespace runs into a single hyphen and
/// removes every character outside `[a-z0-9-]`.
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut hyphenated = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                hyphenated.push('-');
            }
            in_whitespace = true;
        } else {
            hyphenated.push(c);
            in_whitespace = false;
        }
    }

    hyphenated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// An explicit, non-empty slug always wins over the derived one.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> String {
    match explicit.map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => derive_slug(title),
    }
}

/// Reuses an existing identifier, or allocates a fresh random one.
pub fn assign_id(existing: Option<&str>) -> String {
    match existing {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(derive_slug("Hello   World"), "hello-world");
        assert_eq!(derive_slug("tab\t\tand\nnewline"), "tab-and-newline");
    }

    #[test]
    fn strips_disallowed_characters() {
        assert_eq!(derive_slug("Tesla's New Model S!"), "teslas-new-model-s");
        assert_eq!(derive_slug("Mobil Listrik Ç 2025"), "mobil-listrik--2025");
        assert_eq!(derive_slug("a_b.c/d"), "abcd");
    }

    #[test]
    fn keeps_existing_hyphens_and_edges() {
        assert_eq!(derive_slug(" Leading and trailing "), "-leading-and-trailing-");
        assert_eq!(derive_slug("F1 - Race Recap"), "f1---race-recap");
        assert_eq!(derive_slug(""), "");
    }

    #[test]
    fn is_deterministic() {
        let title = "The 2025 Hypercar Shootout";
        assert_eq!(derive_slug(title), derive_slug(title));
    }

    #[test]
    fn explicit_slug_wins() {
        assert_eq!(resolve_slug(Some("custom"), "Some Title"), "custom");
        assert_eq!(resolve_slug(Some("  "), "Some Title"), "some-title");
        assert_eq!(resolve_slug(None, "Some Title"), "some-title");
    }

    #[test]
    fn reuses_or_allocates_ids() {
        assert_eq!(assign_id(Some("keep-me")), "keep-me");

        let fresh = assign_id(None);
        assert!(Uuid::parse_str(&fresh).is_ok());
        assert_ne!(fresh, assign_id(Some("")));
    }
}
