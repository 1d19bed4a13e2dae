//! Utility functions.
//!
//! Normalization helpers shared by every query: string comparison and
//! mention stripping.

pub mod mention;

pub use mention::strip_mention;

/// Case-insensitive string equality.
///
/// Uses full Unicode lower-casing, so `"Général"` equals `"GÉNÉRAL"`.
pub fn compare_strings(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Lower-case a query once so it can be compared against many names.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_strings() {
        assert!(compare_strings("General", "general"));
        assert!(compare_strings("GÉNÉRAL", "général"));
        assert!(!compare_strings("general", "general-2"));
        assert!(compare_strings("", ""));
    }
}
