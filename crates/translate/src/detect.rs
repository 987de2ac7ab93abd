//! Script detection: is any character in the Hebrew block?

use std::ops::RangeInclusive;

use crate::cache::BoundedCache;

/// Hebrew Unicode block.
pub const TARGET_SCRIPT: RangeInclusive<char> = '\u{0590}'..='\u{05FF}';

/// True iff at least one character of `text` is in [`TARGET_SCRIPT`].
pub fn is_target_script(text: &str) -> bool {
    text.chars().any(|c| TARGET_SCRIPT.contains(&c))
}

/// [`is_target_script`] with an optional memo of recent inputs.
pub struct ScriptDetector {
    cache: Option<BoundedCache<String, bool>>,
}

impl ScriptDetector {
    /// `cache_capacity` of `None` or `Some(0)` disables memoization.
    pub fn new(cache_capacity: Option<usize>) -> Self {
        Self {
            cache: cache_capacity.filter(|c| *c > 0).map(BoundedCache::new),
        }
    }

    pub fn is_target_script(&self, text: &str) -> bool {
        let Some(cache) = &self.cache else {
            return is_target_script(text);
        };
        if let Some(hit) = cache.get(text) {
            return hit;
        }
        let result = is_target_script(text);
        cache.insert(text.to_string(), result);
        result
    }
}

impl Default for ScriptDetector {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hebrew_detected() {
        assert!(is_target_script("שלום"));
        assert!(is_target_script("hello שלום"));
    }

    #[test]
    fn test_latin_and_empty_not_detected() {
        assert!(!is_target_script("hello"));
        assert!(!is_target_script(""));
        assert!(!is_target_script("مرحبا"));
    }

    #[test]
    fn test_block_boundaries() {
        assert!(is_target_script("\u{0590}"));
        assert!(is_target_script("\u{05FF}"));
        assert!(!is_target_script("\u{058F}"));
        assert!(!is_target_script("\u{0600}"));
    }

    #[test]
    fn test_cached_detector_matches_plain() {
        let detector = ScriptDetector::new(Some(2));
        for text in ["שלום", "hi", "שלום", "", "abc", "hi"] {
            assert_eq!(detector.is_target_script(text), is_target_script(text));
        }
    }
}
