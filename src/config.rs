use std::time::Duration;

/// Public Google Translate endpoint used by the browser widget ("gtx" client)
pub const DEFAULT_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Source language sent to the provider; "auto" lets it detect per string
pub const DEFAULT_SOURCE_LANGUAGE: &str = "auto";

pub const DEFAULT_TARGET_LANGUAGE: &str = "zh-CN";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    // Provider
    pub api_url: String,
    pub source_language: String,

    // Target used when the caller does not pick one
    pub default_target_language: String,

    // Timeouts
    pub request_timeout: Duration,
    pub overall_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            default_target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            overall_timeout: None,
        }
    }
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Every variable is optional. Values that fail to parse fall back to the
    /// defaults, and a zero overall timeout disables it.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            source_language: std::env::var("TRANSLATE_SOURCE_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string()),
            default_target_language: std::env::var("TRANSLATE_TARGET_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string()),
            request_timeout: Duration::from_secs(
                std::env::var("TRANSLATE_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            overall_timeout: std::env::var("TRANSLATE_OVERALL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}
