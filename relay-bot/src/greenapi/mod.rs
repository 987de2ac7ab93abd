//! Green API (WhatsApp) transport adapter.

mod client;
mod notification;

pub use client::GreenApiClient;
pub use notification::{
    FileMessageData, MessageData, Notification, NotificationBody, SenderData, IMAGE_TYPE,
    TEXT_TYPES,
};
