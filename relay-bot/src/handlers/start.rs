//! Start command handler: static greeting, no history or completion.

use async_trait::async_trait;
use relay_core::{Handler, InboundMessage};
use tracing::info;

/// Literal commands answered with [`GREETING`]. Matched trimmed and case-insensitively.
pub const START_COMMANDS: [&str; 4] = ["/start", "start", "התחל", "היי"];

pub const GREETING: &str = "היי! אני כאן בשבילך. שלח לי הודעה או תמונה ואענה לך.";

pub fn is_start_command(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    START_COMMANDS.iter().any(|c| *c == text)
}

/// Replies to start commands with the greeting.
#[derive(Debug, Default, Clone, Copy)]
pub struct StartHandler;

impl StartHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, message: &InboundMessage) -> anyhow::Result<String> {
        info!(chat_id = %message.chat_id, "step: start command");
        Ok(GREETING.to_string())
    }
}
