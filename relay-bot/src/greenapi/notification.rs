//! Green API notification payloads and their conversion to [`InboundMessage`].

use chrono::{TimeZone, Utc};
use relay_core::{InboundMessage, MessageKind};
use serde::Deserialize;

/// Message types answered by the text handler.
pub const TEXT_TYPES: [&str; 3] = ["textMessage", "extendedTextMessage", "quotedMessage"];

pub const IMAGE_TYPE: &str = "imageMessage";

/// One queued notification from `receiveNotification`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub receipt_id: u64,
    pub body: NotificationBody,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBody {
    pub type_webhook: String,
    #[serde(default)]
    pub id_message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub sender_data: Option<SenderData>,
    #[serde(default)]
    pub message_data: Option<MessageData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderData {
    pub chat_id: String,
    #[serde(default)]
    pub sender_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    pub type_message: String,
    #[serde(default)]
    pub text_message_data: Option<TextMessageData>,
    #[serde(default)]
    pub extended_text_message_data: Option<ExtendedTextMessageData>,
    #[serde(default)]
    pub file_message_data: Option<FileMessageData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageData {
    pub text_message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTextMessageData {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMessageData {
    pub download_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl Notification {
    /// Converts an incoming chat message. Other webhook types (status updates, outgoing
    /// messages, ...) yield `None`; unknown message types come back as
    /// [`MessageKind::Unsupported`].
    pub fn to_inbound(&self) -> Option<InboundMessage> {
        let body = &self.body;
        if body.type_webhook != "incomingMessageReceived" {
            return None;
        }
        let sender = body.sender_data.as_ref()?;
        let data = body.message_data.as_ref()?;
        let id = body.id_message.clone().unwrap_or_default();

        let mut message = if TEXT_TYPES.contains(&data.type_message.as_str()) {
            InboundMessage::text(id, sender.chat_id.clone(), data.text())
        } else if data.type_message == IMAGE_TYPE {
            let file = data.file_message_data.as_ref()?;
            InboundMessage::image(
                id,
                sender.chat_id.clone(),
                file.download_url.clone(),
                file.caption.clone(),
            )
        } else {
            let mut message = InboundMessage::text(id, sender.chat_id.clone(), String::new());
            message.kind = MessageKind::Unsupported(data.type_message.clone());
            message
        };

        if let Some(ts) = body.timestamp.and_then(|t| Utc.timestamp_opt(t, 0).single()) {
            message.received_at = ts;
        }
        Some(message.with_sender_name(sender.sender_name.clone()))
    }
}

impl MessageData {
    /// Text body for the text message types; empty when absent.
    pub fn text(&self) -> String {
        if let Some(data) = &self.text_message_data {
            return data.text_message.clone();
        }
        self.extended_text_message_data
            .as_ref()
            .map(|d| d.text.clone())
            .unwrap_or_default()
    }
}
