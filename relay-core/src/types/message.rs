//! Inbound message model, normalized from whatever the transport delivers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of an inbound message; the router dispatches on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Text,
    Image,
    /// A literal start command (see the start handler).
    Command,
    /// Anything the relay does not answer (audio, stickers, ...). Carries the transport type name.
    Unsupported(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
            MessageKind::Command => "command",
            MessageKind::Unsupported(name) => name,
        }
    }
}

/// Fetchable image plus optional caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub url: String,
    pub caption: Option<String>,
}

/// A single inbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Transport message id; used to quote the original when replying.
    pub id: String,
    /// Transport chat identifier, e.g. `972501234567@c.us`.
    pub chat_id: String,
    pub sender_name: Option<String>,
    pub kind: MessageKind,
    /// Text body. For images this is the caption (possibly empty).
    pub text: String,
    pub image: Option<ImageAttachment>,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    /// Builds a plain text message (used by adapters and tests).
    pub fn text(id: impl Into<String>, chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chat_id: chat_id.into(),
            sender_name: None,
            kind: MessageKind::Text,
            text: text.into(),
            image: None,
            received_at: Utc::now(),
        }
    }

    /// Builds an image message with an optional caption.
    pub fn image(
        id: impl Into<String>,
        chat_id: impl Into<String>,
        url: impl Into<String>,
        caption: Option<String>,
    ) -> Self {
        let caption = caption.filter(|c| !c.trim().is_empty());
        Self {
            id: id.into(),
            chat_id: chat_id.into(),
            sender_name: None,
            kind: MessageKind::Image,
            text: caption.clone().unwrap_or_default(),
            image: Some(ImageAttachment {
                url: url.into(),
                caption,
            }),
            received_at: Utc::now(),
        }
    }

    pub fn with_sender_name(mut self, name: Option<String>) -> Self {
        self.sender_name = name;
        self
    }
}
