//! # Prompt
//!
//! Role-prefixed conversation turns and the single prompt string sent to completion models.
//!
//! ## Format
//!
//! - **Turn**: `User: {text}` or `Bot: {text}`, one per line.
//! - **Prompt**: every line of the working history joined with `\n`, then `\n` and the current
//!   turn once more. The working history already ends with the current turn, so the last turn
//!   appears twice; completion backends have always received it that way.
//!
//! ## External interactions
//!
//! - **Completion backends**: output is the user message of a chat completion request.

use std::fmt;

/// Persona for plain text exchanges.
pub const SYSTEM_PERSONA: &str = "You are a sarcastic friend, quick with witty remarks and a playful attitude. Keep your responses concise and to the point.";

/// System instruction for image exchanges.
pub const VISION_SYSTEM_MESSAGE: &str = "You look at images people send and answer precisely. If the image contains text, transcribe it exactly.";

/// User text used when an image arrives without a caption.
pub const DEFAULT_IMAGE_INSTRUCTION: &str = "Describe this image. If it contains text, transcribe it.";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Line prefix without the trailing space.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Bot => "Bot",
        }
    }
}

/// One role-attributed line of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
        }
    }

    /// Parses a stored `Role: content` line. Returns `None` for unknown prefixes.
    pub fn parse(line: &str) -> Option<Self> {
        if let Some(content) = line.strip_prefix("User: ") {
            return Some(Self::user(content));
        }
        if let Some(content) = line.strip_prefix("Bot: ") {
            return Some(Self::bot(content));
        }
        None
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role.label(), self.content)
    }
}

/// Builds the prompt from the untruncated working history plus the current turn.
///
/// `history` is expected to already end with `current`; it is appended again regardless.
pub fn build_history_prompt<I, S>(history: I, current: &Turn) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, line) in history.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    out.push('\n');
    out.push_str(&current.to_string());
    out
}
