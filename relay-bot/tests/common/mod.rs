//! Fakes shared by the relay-bot integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use history::JsonFileHistoryStore;
use llm_client::{LlmClient, LlmError, ModelSelector, VisionLlmClient};
use relay_bot::AppContext;
use relay_core::{Bot, InboundMessage};
use translate::{Lang, ScriptDetector, TranslateError, TranslationBackend, Translator};

/// Text completion fake: records prompts and returns a fixed reply or a backend error.
pub struct FakeLlm {
    reply: Result<String, String>,
    delay: Duration,
    pub prompts: Mutex<Vec<String>>,
    pub systems: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn replying(reply: &str) -> Self {
        Self::new(Ok(reply.to_string()))
    }

    pub fn failing(detail: &str) -> Self {
        Self::new(Err(detail.to_string()))
    }

    fn new(reply: Result<String, String>) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
            systems: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        _selector: &ModelSelector,
    ) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.systems.lock().unwrap().push(system.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().map_err(LlmError::Backend)
    }
}

/// Vision fake: records (prompt, image url, system) and returns a fixed reply.
pub struct FakeVision {
    reply: Result<String, String>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeVision {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            reply: Err(detail.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionLlmClient for FakeVision {
    async fn complete_with_image(
        &self,
        prompt: &str,
        image_url: &str,
        system: &str,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push((
            prompt.to_string(),
            image_url.to_string(),
            system.to_string(),
        ));
        self.reply.clone().map_err(LlmError::Backend)
    }
}

/// Translation fake with one fixed answer per target language, counting calls.
pub struct FakeTranslation {
    english: String,
    hebrew: String,
    fail: bool,
    pub to_english: AtomicUsize,
    pub to_hebrew: AtomicUsize,
}

impl FakeTranslation {
    pub fn new(english: &str, hebrew: &str) -> Self {
        Self {
            english: english.to_string(),
            hebrew: hebrew.to_string(),
            fail: false,
            to_english: AtomicUsize::new(0),
            to_hebrew: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("", "")
        }
    }

    pub fn english_calls(&self) -> usize {
        self.to_english.load(Ordering::SeqCst)
    }

    pub fn hebrew_calls(&self) -> usize {
        self.to_hebrew.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationBackend for FakeTranslation {
    async fn translate(&self, _text: &str, target: Lang) -> Result<String, TranslateError> {
        let answer = match target {
            Lang::English => {
                self.to_english.fetch_add(1, Ordering::SeqCst);
                &self.english
            }
            Lang::Hebrew => {
                self.to_hebrew.fetch_add(1, Ordering::SeqCst);
                &self.hebrew
            }
        };
        if self.fail {
            return Err(TranslateError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(answer.clone())
    }
}

/// Bot fake recording every reply as (chat id, quoted message id, text).
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingBot {
    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> relay_core::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), String::new(), text.to_string()));
        Ok(())
    }

    async fn reply_to(&self, message: &InboundMessage, text: &str) -> relay_core::Result<()> {
        self.sent.lock().unwrap().push((
            message.chat_id.clone(),
            message.id.clone(),
            text.to_string(),
        ));
        Ok(())
    }
}

/// AppContext over a history directory and the given fakes, caches disabled.
pub fn test_context(
    history_dir: &Path,
    window: usize,
    llm: Arc<FakeLlm>,
    vision: Arc<FakeVision>,
    translation: Arc<FakeTranslation>,
) -> AppContext {
    AppContext {
        history: Arc::new(JsonFileHistoryStore::new(history_dir)),
        history_window: window,
        detector: Arc::new(ScriptDetector::new(None)),
        translator: Arc::new(Translator::new(translation, None, Duration::from_secs(5))),
        llm,
        model_selector: ModelSelector::Random,
        vision,
    }
}

pub fn read_history(history_dir: &Path, user: &str) -> Option<Vec<String>> {
    let path = history_dir.join(format!("{}_data.json", user));
    let bytes = std::fs::read(path).ok()?;
    Some(serde_json::from_slice(&bytes).unwrap())
}

pub fn write_history(history_dir: &Path, user: &str, lines: &[String]) {
    std::fs::create_dir_all(history_dir).unwrap();
    let path = history_dir.join(format!("{}_data.json", user));
    std::fs::write(path, serde_json::to_vec(lines).unwrap()).unwrap();
}
