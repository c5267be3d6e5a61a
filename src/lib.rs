//! Translate the string values of a JSON document into another language.
//!
//! Keys, numbers, booleans, nulls and the overall shape of the document are
//! left untouched. Each string is sent to a remote provider on its own;
//! a failed string keeps its original text instead of failing the run.
//!
//! ```rust,ignore
//! use json_translate::{config::Config, document, translation::GoogleTranslator, traverse};
//!
//! let config = Config::from_env();
//! let provider = GoogleTranslator::from_config(&config)?;
//! let value = document::parse_document(r#"{"greeting": "Hello"}"#)?;
//! let translated = traverse::translate_tree(&provider, &value, "fr", |done, total| {
//!     println!("{}/{}", done, total);
//! })
//! .await?;
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod i18n;
pub mod progress;
pub mod translation;
pub mod traverse;

pub use error::{ProviderError, TranslateError};
pub use translation::{translate_leaf, GoogleTranslator, TranslationProvider};
pub use traverse::{
    count_leaves, translate_tree, translate_tree_with, CancelFlag, TranslatedDocument,
    TraversalOptions,
};
