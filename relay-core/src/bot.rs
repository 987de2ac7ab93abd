//! Outbound side of the transport.
//!
//! [`Bot`] is transport-agnostic; the Green API adapter in `relay-bot` implements it.

use crate::error::Result;
use crate::types::InboundMessage;
use async_trait::async_trait;

/// Sends text back to a chat. Every handled inbound message produces exactly one `reply_to` call.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()>;

    /// Replies to the given message in its originating chat.
    async fn reply_to(&self, message: &InboundMessage, text: &str) -> Result<()> {
        self.send_message(&message.chat_id, text).await
    }
}
