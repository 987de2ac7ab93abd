//! # Translate
//!
//! Language gate for the relay: [`ScriptDetector`] decides whether text is Hebrew, and
//! [`Translator`] turns text into another language without ever failing the exchange.
//!
//! ## Fail-open
//!
//! [`Translator::translate`] always returns a string. Backend failures come back as
//! `"Error occurred during translation: <detail>"`, which callers pass on as if it were the
//! translation.

mod backend;
mod cache;
mod detect;
mod error;
mod lang;
mod translator;

pub use backend::{GoogleTranslateBackend, TranslationBackend, DEFAULT_TRANSLATE_URL};
pub use cache::BoundedCache;
pub use detect::{is_target_script, ScriptDetector, TARGET_SCRIPT};
pub use error::TranslateError;
pub use lang::Lang;
pub use translator::{Translator, TRANSLATION_ERROR_PREFIX};
