//! Fail-open translator with optional memoization.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::backend::TranslationBackend;
use crate::cache::BoundedCache;
use crate::error::TranslateError;
use crate::lang::Lang;

/// Start of the text returned in place of a translation when the backend fails.
pub const TRANSLATION_ERROR_PREFIX: &str = "Error occurred during translation:";

/// Wraps a [`TranslationBackend`] with a timeout, a cache of successful results, and the
/// fail-open error text.
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
    cache: Option<BoundedCache<(String, Lang), String>>,
    timeout: Duration,
}

impl Translator {
    /// `cache_capacity` of `None` or `Some(0)` disables caching.
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        cache_capacity: Option<usize>,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            cache: cache_capacity.filter(|c| *c > 0).map(BoundedCache::new),
            timeout,
        }
    }

    /// Returns the translation, or `"Error occurred during translation: <detail>"`.
    pub async fn translate(&self, text: &str, target: Lang) -> String {
        let key = (text.to_string(), target);
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            return hit;
        }

        match self.try_translate(text, target).await {
            Ok(translated) => {
                info!(target_lang = %target, "step: translated");
                if let Some(cache) = &self.cache {
                    cache.insert(key, translated.clone());
                }
                translated
            }
            Err(e) => {
                warn!(target_lang = %target, error = %e, "Translation failed");
                format!("{} {}", TRANSLATION_ERROR_PREFIX, e)
            }
        }
    }

    async fn try_translate(&self, text: &str, target: Lang) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }
        tokio::time::timeout(self.timeout, self.backend.translate(text, target))
            .await
            .map_err(|_| TranslateError::Timeout(self.timeout.as_secs()))?
    }
}
