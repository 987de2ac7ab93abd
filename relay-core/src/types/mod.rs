//! Core types: inbound message, user identity, and the Handler trait.

mod handler;
mod message;
mod user;

pub use handler::Handler;
pub use message::{ImageAttachment, InboundMessage, MessageKind};
pub use user::UserId;
