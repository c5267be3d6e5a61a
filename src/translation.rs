use crate::config::Config;
use crate::error::ProviderError;
use crate::i18n::TranslationMetrics;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// A remote service that translates one string at a time.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` into the `target` language code.
    async fn translate(&self, text: &str, target: &str) -> Result<String, ProviderError>;
}

/// Google Translate through the keyless "gtx" endpoint
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
    source_language: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            source_language: config.source_language.clone(),
        }
    }

    /// Build a translator with its own HTTP client.
    ///
    /// The client carries the per-call timeout, so a stalled request fails
    /// that single leaf instead of blocking the whole document.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(client, config))
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, ProviderError> {
        debug!(
            "Requesting translation {} -> {} ({} chars)",
            self.source_language,
            target,
            text.chars().count()
        );

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_language.as_str()),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Status { status, body });
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        extract_translation(&data)
    }
}

/// Pull the translated text out of a gtx response.
///
/// The body looks like `[[["Bonjour. ","Hello. ",...],["Au revoir","Goodbye",...]],null,"en",...]`:
/// one entry per sentence, translated text first. Entries without a leading
/// string (transliterations) are ignored.
fn extract_translation(data: &Value) -> Result<String, ProviderError> {
    let sentences = data.get(0).and_then(Value::as_array).ok_or_else(|| {
        ProviderError::MalformedResponse("response has no sentence list".to_string())
    })?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "response contained no translated text".to_string(),
        ));
    }

    Ok(translated)
}

/// Translate a single string leaf.
///
/// Never fails: when the provider errors the original text is returned and
/// the failure is logged. Blank strings are returned as-is without a call.
/// One attempt only.
pub async fn translate_leaf(
    provider: &dyn TranslationProvider,
    text: &str,
    target: &str,
    metrics: &TranslationMetrics,
) -> String {
    if text.trim().is_empty() {
        metrics.record_skipped();
        return text.to_string();
    }

    metrics.record_api_call();
    match provider.translate(text, target).await {
        Ok(translated) => translated,
        Err(e) => {
            metrics.record_api_failure();
            warn!(
                "Translation to {} failed for {:?}, keeping original: {}",
                target,
                preview(text),
                e
            );
            text.to_string()
        }
    }
}

/// Shorten a string for log output
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    }
}
