//! History crate: per-user rolling conversation log.
//!
//! ## Modules
//!
//! - [`error`] – History error types
//! - [`store`] – [`HistoryStore`] trait
//! - [`json_store`] – [`JsonFileHistoryStore`]: one JSON array of turn lines per user
//! - [`window`] – [`truncate_window`]

mod error;
mod json_store;
mod store;
mod window;

pub use error::HistoryError;
pub use json_store::JsonFileHistoryStore;
pub use store::HistoryStore;
pub use window::{truncate_window, DEFAULT_WINDOW};
