//! User identity derived from the transport chat identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// Digits-only identity used as the history storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Strips every non-digit character from `chat_id`. Fails when nothing is left, so distinct
    /// digit-less chats never share one history file.
    pub fn from_chat_id(chat_id: &str) -> Result<Self, HandlerError> {
        let digits: String = chat_id.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(HandlerError::InvalidSender(chat_id.to_string()));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
