//! Platform-name normalization.
//!
//! Platform names are display strings typed by the user; they become part of
//! the lookup key, so every operation canonicalizes them the same way:
//! whitespace-delimited tokens, each title-cased, rejoined with single spaces.

/// Canonicalize a platform name: "  gMAIL  app " becomes "Gmail App".
/// Empty or whitespace-only input yields the empty string; callers reject
/// that case before it can become a key.
pub fn normalize_platform(input: &str) -> String {
    input
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_case_and_padding() {
        assert_eq!(normalize_platform("  gMAIL  app "), "Gmail App");
    }

    #[test]
    fn test_already_normalized() {
        assert_eq!(normalize_platform("Gmail"), "Gmail");
    }

    #[test]
    fn test_all_caps() {
        assert_eq!(normalize_platform("GMAIL"), "Gmail");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize_platform(""), "");
        assert_eq!(normalize_platform("   \t  "), "");
    }

    #[test]
    fn test_single_character_tokens() {
        assert_eq!(normalize_platform("x y z"), "X Y Z");
    }

    #[test]
    fn test_interior_whitespace_collapses() {
        assert_eq!(normalize_platform("google\t\tdrive"), "Google Drive");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_platform("  gMAIL  app ");
        assert_eq!(normalize_platform(&once), once);
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(normalize_platform("émail"), "Émail");
    }
}
