//! Utility types and functions.

/// Flatten a display string into a lowercase, hyphen-separated slug.
///
/// Used to derive deterministic record keys: the same input always
/// produces the same slug, so re-deriving a key is idempotent.
///
/// Runs of non-alphanumeric characters collapse into a single hyphen,
/// and leading/trailing hyphens are dropped.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::simple("Year 3 Blue", "year-3-blue")]
    #[case::punctuation("St. Mary's Primary", "st-mary-s-primary")]
    #[case::extra_whitespace("  All   Children  ", "all-children")]
    #[case::already_slug("year-3-blue", "year-3-blue")]
    #[case::empty("", "")]
    #[case::only_symbols("!!!", "")]
    fn test_slugify(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let once = slugify("St. Mary's Primary");
        assert_eq!(slugify(&once), once);
    }
}
