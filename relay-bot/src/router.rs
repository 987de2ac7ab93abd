//! Dispatch table from message kind to handler, and the fail-open reply policy.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use relay_core::{Handler, InboundMessage, MessageKind};
use tracing::{error, info, instrument};

use crate::components::AppContext;
use crate::handlers::{is_start_command, ImageHandler, StartHandler, TextHandler};

/// Start of every reply produced for a failed exchange.
pub const FAILURE_PREFIX: &str = "Failed to return message:";

/// Maps message kinds to handlers. Built once at startup.
#[derive(Clone, Default)]
pub struct Router {
    routes: HashMap<MessageKind, Arc<dyn Handler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `kind`, replacing any previous one.
    pub fn route(mut self, kind: MessageKind, handler: Arc<dyn Handler>) -> Self {
        self.routes.insert(kind, handler);
        self
    }

    /// Kind used for dispatch: text that is a start command becomes [`MessageKind::Command`].
    pub fn classify(message: &InboundMessage) -> MessageKind {
        match &message.kind {
            MessageKind::Text if is_start_command(&message.text) => MessageKind::Command,
            kind => kind.clone(),
        }
    }

    /// Whether a handler is registered for this message.
    pub fn handles(&self, message: &InboundMessage) -> bool {
        self.routes.contains_key(&Self::classify(message))
    }

    /// Runs the matching handler and returns the reply. `None` means no handler is registered,
    /// so nothing is sent. A handler error or panic becomes `"Failed to return message: <error>"`.
    #[instrument(skip(self, message), fields(chat_id = %message.chat_id, message_id = %message.id))]
    pub async fn dispatch(&self, message: &InboundMessage) -> Option<String> {
        let kind = Self::classify(message);
        let handler = self.routes.get(&kind)?;
        info!(kind = %kind.as_str(), "step: dispatching");

        let outcome = AssertUnwindSafe(handler.handle(message)).catch_unwind().await;
        let reply = match outcome {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                error!(error = %e, kind = %kind.as_str(), "Handler failed");
                format!("{} {}", FAILURE_PREFIX, e)
            }
            Err(panic) => {
                let detail = panic_message(panic.as_ref());
                error!(error = %detail, kind = %kind.as_str(), "Handler panicked");
                format!("{} {}", FAILURE_PREFIX, detail)
            }
        };
        Some(reply)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Router with the text, image and start command handlers.
pub fn build_router(ctx: &AppContext) -> Router {
    Router::new()
        .route(MessageKind::Text, Arc::new(TextHandler::new(ctx.clone())))
        .route(MessageKind::Image, Arc::new(ImageHandler::new(ctx.clone())))
        .route(MessageKind::Command, Arc::new(StartHandler::new()))
}
