//! Handlers for the three message kinds the relay answers.

mod exchange;
mod image;
mod start;
mod text;

pub use image::ImageHandler;
pub use start::{is_start_command, StartHandler, GREETING, START_COMMANDS};
pub use text::TextHandler;
