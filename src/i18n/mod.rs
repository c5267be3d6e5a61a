//! Language handling and translation observability.
//!
//! # Architecture
//!
//! - `registry`: catalogue of the languages offered in the language menu
//! - `language`: opaque target language code, resolved from menu or free text
//! - `metrics`: per-run counters for provider calls and fallbacks
//!
//! # Example
//!
//! ```rust,ignore
//! use json_translate::i18n::{Language, LanguageRegistry};
//!
//! let target = Language::resolve("zh-CN", Some("haw"));
//! let menu = LanguageRegistry::get().list_all();
//! ```

mod language;
mod metrics;
mod registry;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
