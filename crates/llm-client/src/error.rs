//! Completion error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("timed out after {0}s")]
    Timeout(u64),
    #[error("empty response from model {0}")]
    EmptyResponse(String),
}
