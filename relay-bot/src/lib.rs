//! # WhatsApp relay bot
//!
//! Wires the Green API transport to the relay handlers: language gate and translation,
//! per-user rolling history, Groq text completion and OpenAI vision completion.
//!
//! Every handled message gets exactly one reply; failures become
//! `"Failed to return message: <error>"`.

pub mod cli;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod greenapi;
pub mod handlers;
pub mod lock;
pub mod router;
pub mod runner;

pub use cli::{check_report, load_config, read_history, render_history, Cli, Commands};
pub use components::{build_app_context, AppContext};
pub use config::{BaseConfig, BotConfig};
pub use dispatcher::Dispatcher;
pub use greenapi::{GreenApiClient, Notification};
pub use handlers::{ImageHandler, StartHandler, TextHandler, GREETING, START_COMMANDS};
pub use lock::ProcessLock;
pub use router::{build_router, Router, FAILURE_PREFIX};
pub use runner::{poll_loop, run_bot};
