//! Component factory: builds the AppContext from config. Isolates assembly logic from the runner.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use history::{HistoryStore, JsonFileHistoryStore};
use llm_client::{
    LlmClient, ModelSelector, OpenAILlmClient, OpenAIVisionClient, SamplingParams, VisionLlmClient,
};
use openai_client::mask_token;
use tracing::{info, instrument};
use translate::{GoogleTranslateBackend, ScriptDetector, TranslationBackend, Translator};

use crate::config::BotConfig;

/// Everything a handler needs for one exchange. Built once at startup and shared by handle.
#[derive(Clone)]
pub struct AppContext {
    pub history: Arc<dyn HistoryStore>,
    /// Turns kept in persisted history.
    pub history_window: usize,
    pub detector: Arc<ScriptDetector>,
    pub translator: Arc<Translator>,
    pub llm: Arc<dyn LlmClient>,
    pub model_selector: ModelSelector,
    pub vision: Arc<dyn VisionLlmClient>,
}

/// Builds the AppContext from config: JSON history store, Google translation, Groq text
/// completion and OpenAI vision completion.
#[instrument(skip(config))]
pub fn build_app_context(config: &BotConfig) -> Result<AppContext> {
    let base = config.base();
    let llm = config.llm();

    let cache_size = Some(base.translate_cache_size);
    let translate_backend: Arc<dyn TranslationBackend> = Arc::new(
        GoogleTranslateBackend::with_url(
            base.translate_url.clone(),
            Duration::from_secs(base.translate_timeout_secs),
        )
        .map_err(|e| anyhow::anyhow!("Failed to build translation client: {}", e))?,
    );
    let translator = Arc::new(Translator::new(
        translate_backend,
        cache_size,
        Duration::from_secs(base.translate_timeout_secs),
    ));

    let timeout = Duration::from_secs(llm.timeout_secs);
    let params = SamplingParams::default()
        .with_temperature(llm.temperature)
        .with_max_tokens(llm.max_tokens);
    let text_client: Arc<dyn LlmClient> = Arc::new(
        OpenAILlmClient::with_base_url(
            llm.groq_api_key.clone(),
            llm.groq_base_url.clone(),
            llm.model_pool.clone(),
        )
        .with_params(params)
        .with_timeout(timeout),
    );
    let vision_client: Arc<dyn VisionLlmClient> = Arc::new(
        OpenAIVisionClient::with_base_url(llm.openai_api_key.clone(), llm.openai_base_url.clone())
            .with_model(llm.vision_model.clone())
            .with_max_tokens(llm.max_tokens)
            .with_timeout(timeout),
    );

    info!(
        history_dir = %base.history_dir.display(),
        history_window = base.history_window,
        groq_base_url = %llm.groq_base_url,
        groq_api_key = %mask_token(&llm.groq_api_key),
        models = ?llm.model_pool.models(),
        model_selector = ?llm.model_selector,
        vision_model = %llm.vision_model,
        "Building app context"
    );

    Ok(AppContext {
        history: Arc::new(JsonFileHistoryStore::new(base.history_dir.clone())),
        history_window: base.history_window,
        detector: Arc::new(ScriptDetector::new(cache_size)),
        translator,
        llm: text_client,
        model_selector: llm.model_selector.clone(),
        vision: vision_client,
    })
}
