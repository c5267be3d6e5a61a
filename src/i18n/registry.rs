//! Language registry: the catalogue of target languages offered to users.
//!
//! The registry is only a menu. Codes outside it are still accepted as
//! target languages and passed to the provider untouched.

use std::sync::OnceLock;

/// A selectable target language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Provider language code (e.g., "fr", "zh-CN")
    pub code: &'static str,

    /// English name of the language (e.g., "French")
    pub name: &'static str,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the code is in the catalogue
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all languages, in menu order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }
}

fn language(code: &'static str, name: &'static str) -> LanguageConfig {
    LanguageConfig { code, name }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        language("am", "Amharic"),
        language("ar", "Arabic"),
        language("zh-CN", "Chinese (Simplified)"),
        language("zh-TW", "Chinese (Traditional)"),
        language("cs", "Czech"),
        language("da", "Danish"),
        language("nl", "Dutch"),
        language("en", "English"),
        language("fi", "Finnish"),
        language("fr", "French"),
        language("de", "German"),
        language("el", "Greek"),
        language("ha", "Hausa"),
        language("hi", "Hindi"),
        language("hu", "Hungarian"),
        language("ig", "Igbo"),
        language("id", "Indonesian"),
        language("it", "Italian"),
        language("ja", "Japanese"),
        language("ko", "Korean"),
        language("ne", "Nepali"),
        language("no", "Norwegian"),
        language("pl", "Polish"),
        language("pt", "Portuguese"),
        language("ro", "Romanian"),
        language("ru", "Russian"),
        language("si", "Sinhala"),
        language("sk", "Slovak"),
        language("so", "Somali"),
        language("es", "Spanish"),
        language("sw", "Swahili"),
        language("sv", "Swedish"),
        language("th", "Thai"),
        language("tr", "Turkish"),
        language("uk", "Ukrainian"),
        language("ur", "Urdu"),
        language("vi", "Vietnamese"),
        language("yo", "Yoruba"),
        language("zu", "Zulu"),
    ]
}
