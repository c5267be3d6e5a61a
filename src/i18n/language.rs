//! Target language: an opaque code passed verbatim to the provider.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use std::fmt;

/// A target language code.
///
/// No validation or normalization is applied. The registry is consulted
/// only to produce a friendly name for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    code: String,
}

impl Language {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Pick the target language from a menu selection and an optional
    /// free-form code.
    ///
    /// A custom code wins when it is non-empty after trimming.
    ///
    /// # Example
    /// ```ignore
    /// let lang = Language::resolve("zh-CN", Some(" haw "));
    /// assert_eq!(lang.code(), "haw");
    /// ```
    pub fn resolve(selected: &str, custom: Option<&str>) -> Self {
        match custom.map(str::trim) {
            Some(code) if !code.is_empty() => Self::new(code),
            _ => Self::new(selected),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Catalogue entry for this code, if it is one of the menu languages.
    pub fn config(&self) -> Option<&'static LanguageConfig> {
        LanguageRegistry::get().get_by_code(&self.code)
    }

    /// English name when known.
    pub fn name(&self) -> Option<&'static str> {
        self.config().map(|config| config.name)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.code),
            None => f.write_str(&self.code),
        }
    }
}
