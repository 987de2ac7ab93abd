//! Translation error types. Never surfaced to callers of [`crate::Translator`]; they are
//! rendered into the fail-open error text instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("text is empty")]
    EmptyInput,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translation service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
    #[error("timed out after {0}s")]
    Timeout(u64),
}
