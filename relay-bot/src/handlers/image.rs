//! Image handler: caption through the language gate, vision completion, same history tail.

use async_trait::async_trait;
use prompt::{DEFAULT_IMAGE_INSTRUCTION, VISION_SYSTEM_MESSAGE};
use relay_core::{Handler, HandlerError, InboundMessage, UserId};
use tracing::{info, instrument};

use super::exchange::{begin, gate_inbound, translate_back, Gated};
use crate::components::AppContext;

/// Answers image messages through the vision completion backend.
///
/// Without a caption the fixed instruction is used and no translation happens either way.
pub struct ImageHandler {
    ctx: AppContext,
}

impl ImageHandler {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Handler for ImageHandler {
    #[instrument(skip(self, message), fields(chat_id = %message.chat_id, message_id = %message.id))]
    async fn handle(&self, message: &InboundMessage) -> anyhow::Result<String> {
        let user = UserId::from_chat_id(&message.chat_id)?;
        let image = message.image.as_ref().ok_or(HandlerError::NoImage)?;
        info!(user_id = %user, has_caption = image.caption.is_some(), "step: image handler started");

        let gated = match image.caption.as_deref() {
            Some(caption) => gate_inbound(&self.ctx, caption).await,
            None => Gated {
                inbound_target: false,
                text: DEFAULT_IMAGE_INSTRUCTION.to_string(),
            },
        };
        let pending = begin(&self.ctx, &user, &gated.text).await;

        let response = match self
            .ctx
            .vision
            .complete_with_image(&pending.prompt, &image.url, VISION_SYSTEM_MESSAGE)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                pending.abandon(&self.ctx).await;
                return Err(HandlerError::Completion(e.to_string()).into());
            }
        };
        info!(user_id = %user, response_len = response.len(), "step: vision completion received");

        pending.finish(&self.ctx, &response).await;
        Ok(translate_back(&self.ctx, gated.inbound_target, response).await)
    }
}
