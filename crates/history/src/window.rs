//! Rolling window over history lines.

/// Turns kept per user unless configured otherwise.
pub const DEFAULT_WINDOW: usize = 10;

/// Keeps the last `max_len` lines, order preserved.
pub fn truncate_window(mut history: Vec<String>, max_len: usize) -> Vec<String> {
    if history.len() > max_len {
        history.drain(..history.len() - max_len);
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("User: {}", i)).collect()
    }

    #[test]
    fn test_shorter_than_window_is_unchanged() {
        assert_eq!(truncate_window(lines(3), 10), lines(3));
    }

    #[test]
    fn test_exact_window_is_unchanged() {
        assert_eq!(truncate_window(lines(10), 10), lines(10));
    }

    #[test]
    fn test_drops_oldest() {
        let kept = truncate_window(lines(25), 20);
        assert_eq!(kept.len(), 20);
        assert_eq!(kept.first().map(String::as_str), Some("User: 5"));
        assert_eq!(kept.last().map(String::as_str), Some("User: 24"));
    }

    #[test]
    fn test_zero_window_empties() {
        assert!(truncate_window(lines(4), 0).is_empty());
    }
}
