//! Unit tests for [`openai_client::mask_token`].
//!
//! API keys are masked for safe logging: first 7 chars + `***` + last 4 chars.
//! Keys of length ≤ 11 are fully masked as `***`.

use openai_client::mask_token;

/// **Test: Short or empty tokens are fully masked.**
#[test]
fn mask_token_short_returns_all_star() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("gsk_1234"), "***");
    assert_eq!(mask_token("sk-proj-12"), "***");
}

/// **Test: Groq-style key shows its prefix and last 4 characters.**
#[test]
fn mask_token_groq_key() {
    let masked = mask_token("gsk_abcdefghijklmnopqrstuvwxyz0123");
    assert_eq!(masked, "gsk_abc***0123");
}

/// **Test: Non-ASCII input is never sliced.**
#[test]
fn mask_token_non_ascii_is_fully_masked() {
    assert_eq!(mask_token("מפתח-סודי-ארוך-מאוד"), "***");
}
