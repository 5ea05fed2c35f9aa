//! Key Normalization Adapter
//!
//! Flash keys are looked up indifferently to casing and spelling style:
//! `notice`, `Notice`, and the symbol-style `:notice` all address the same
//! entry. The rule lives in a dedicated adapter so the storage engine stays
//! agnostic of it; normalization affects lookup only, never the spelling an
//! entry reports when iterated.

/// Maps externally supplied key spellings onto canonical lookup keys.
///
/// Implementations must be pure: the same input always normalizes to the
/// same output, with no side effects.
pub trait KeyAdapter: Send + Sync {
    /// Returns the canonical form of `key` used for map and flag lookups.
    fn normalize(&self, key: &str) -> String;
}

/// The default adapter: ASCII case-fold, with a leading `:` stripped so
/// symbol-style spellings alias their string spellings.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseFold;

impl KeyAdapter for CaseFold {
    fn normalize(&self, key: &str) -> String {
        let key = key.strip_prefix(':').unwrap_or(key);
        key.to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_fold() {
        let adapter = CaseFold;
        assert_eq!(adapter.normalize("notice"), "notice");
        assert_eq!(adapter.normalize("Notice"), "notice");
        assert_eq!(adapter.normalize("NOTICE"), "notice");
    }

    #[test]
    fn test_symbol_prefix() {
        let adapter = CaseFold;
        assert_eq!(adapter.normalize(":notice"), "notice");
        assert_eq!(adapter.normalize(":Alert"), "alert");
        // Only a leading colon is special
        assert_eq!(adapter.normalize("a:b"), "a:b");
    }

    #[test]
    fn test_non_ascii_untouched() {
        let adapter = CaseFold;
        assert_eq!(adapter.normalize("größe"), "größe");
    }
}
