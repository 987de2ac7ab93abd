//! # Relay core
//!
//! Transport-agnostic types and traits shared by the relay: inbound message model, user identity,
//! [`Handler`] and [`Bot`] traits, error types and tracing setup.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{Handler, ImageAttachment, InboundMessage, MessageKind, UserId};
