//! Structural traversal: translate every string leaf of a JSON value while
//! keeping its shape.
//!
//! Children of one container are translated concurrently and reassembled
//! in their original order. Numbers, booleans and null pass through. Each
//! string leaf bumps a per-call counter exactly once and fires the progress
//! callback, whether its translation succeeded or fell back.

use crate::error::TranslateError;
use crate::i18n::{MetricsReport, TranslationMetrics};
use crate::translation::{translate_leaf, TranslationProvider};
use futures::future::{try_join_all, BoxFuture, FutureExt};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Cooperative cancellation shared between a caller and a running traversal.
///
/// Checked before each leaf is dispatched. Leaves already in flight finish,
/// but nothing new is started once cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Optional limits on a traversal
#[derive(Debug, Clone, Default)]
pub struct TraversalOptions {
    pub cancel: Option<CancelFlag>,
    pub timeout: Option<Duration>,
}

impl TraversalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Result of a completed traversal.
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    pub value: Value,
    pub report: MetricsReport,
}

/// Count the string leaves reachable from `value`.
pub fn count_leaves(value: &Value) -> usize {
    match value {
        Value::String(_) => 1,
        Value::Array(items) => items.iter().map(count_leaves).sum(),
        Value::Object(map) => map.values().map(count_leaves).sum(),
        Value::Null | Value::Bool(_) | Value::Number(_) => 0,
    }
}

/// Translate every string leaf of `value` into `target`.
///
/// `on_progress(completed, total)` is called once per string leaf, in
/// completion order. Provider failures never fail the traversal; the
/// affected leaves keep their original text.
pub async fn translate_tree<F>(
    provider: &dyn TranslationProvider,
    value: &Value,
    target: &str,
    on_progress: F,
) -> Result<Value, TranslateError>
where
    F: Fn(usize, usize) + Sync,
{
    let translated =
        translate_tree_with(provider, value, target, &TraversalOptions::new(), on_progress).await?;
    Ok(translated.value)
}

/// Like [`translate_tree`], with cancellation and an overall deadline, and
/// returning the run's metrics alongside the value.
pub async fn translate_tree_with<F>(
    provider: &dyn TranslationProvider,
    value: &Value,
    target: &str,
    options: &TraversalOptions,
    on_progress: F,
) -> Result<TranslatedDocument, TranslateError>
where
    F: Fn(usize, usize) + Sync,
{
    let total = count_leaves(value);
    let metrics = TranslationMetrics::new();
    let traversal = Traversal {
        provider,
        target,
        total,
        completed: AtomicUsize::new(0),
        on_progress: &on_progress,
        cancel: options.cancel.as_ref(),
        metrics: &metrics,
    };

    info!("Translating {} string leaves to {}", total, target);

    let translated = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, traversal.walk(value))
            .await
            .map_err(|_| TranslateError::TimedOut(limit))??,
        None => traversal.walk(value).await?,
    };

    let report = metrics.report();
    info!(
        "Translated {} leaves to {} ({} provider calls, {} fell back)",
        traversal.completed.load(Ordering::SeqCst),
        target,
        report.api_calls,
        report.api_failures
    );

    Ok(TranslatedDocument {
        value: translated,
        report,
    })
}

/// State for one traversal call. Never shared across calls.
struct Traversal<'a, F> {
    provider: &'a dyn TranslationProvider,
    target: &'a str,
    total: usize,
    completed: AtomicUsize,
    on_progress: &'a F,
    cancel: Option<&'a CancelFlag>,
    metrics: &'a TranslationMetrics,
}

impl<'a, F> Traversal<'a, F>
where
    F: Fn(usize, usize) + Sync,
{
    fn walk<'v>(&'v self, value: &'v Value) -> BoxFuture<'v, Result<Value, TranslateError>>
    where
        'a: 'v,
        F: 'v,
    {
        async move {
            match value {
                Value::String(text) => self.translate_string(text).await.map(Value::String),
                Value::Array(items) => {
                    let translated = try_join_all(items.iter().map(|item| self.walk(item))).await?;
                    Ok(Value::Array(translated))
                }
                Value::Object(map) => {
                    let translated = try_join_all(map.values().map(|item| self.walk(item))).await?;
                    Ok(Value::Object(map.keys().cloned().zip(translated).collect()))
                }
                Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.clone()),
            }
        }
        .boxed()
    }

    async fn translate_string(&self, text: &str) -> Result<String, TranslateError> {
        if self.cancel.is_some_and(CancelFlag::is_cancelled) {
            debug!("Traversal cancelled before dispatching a leaf");
            return Err(TranslateError::Cancelled);
        }

        let translated = translate_leaf(self.provider, text, self.target, self.metrics).await;

        let completed = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        (self.on_progress)(completed, self.total);

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Looks strings up in a table; unknown strings fail.
    struct TableProvider {
        table: HashMap<&'static str, &'static str>,
    }

    impl TableProvider {
        fn new(entries: &[(&'static str, &'static str)]) -> Self {
            Self {
                table: entries.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl TranslationProvider for TableProvider {
        async fn translate(&self, text: &str, _target: &str) -> Result<String, ProviderError> {
            self.table
                .get(text)
                .map(|t| t.to_string())
                .ok_or_else(|| ProviderError::MalformedResponse(format!("no entry for {}", text)))
        }
    }

    /// Wraps text as `<target:text>`, sleeping longer for shorter strings so
    /// later siblings tend to finish first.
    struct SlowTaggingProvider;

    #[async_trait]
    impl TranslationProvider for SlowTaggingProvider {
        async fn translate(&self, text: &str, target: &str) -> Result<String, ProviderError> {
            let delay = 60u64.saturating_sub(text.len() as u64 * 10);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(format!("<{}:{}>", target, text))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl TranslationProvider for FailingProvider {
        async fn translate(&self, _text: &str, _target: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    /// Cancels the shared flag as soon as it is called once.
    struct CancellingProvider {
        cancel: CancelFlag,
    }

    #[async_trait]
    impl TranslationProvider for CancellingProvider {
        async fn translate(&self, text: &str, _target: &str) -> Result<String, ProviderError> {
            self.cancel.cancel();
            Ok(text.to_string())
        }
    }

    struct StalledProvider;

    #[async_trait]
    impl TranslationProvider for StalledProvider {
        async fn translate(&self, text: &str, _target: &str) -> Result<String, ProviderError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(text.to_string())
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<(usize, usize)>>>, impl Fn(usize, usize) + Sync) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        (events, move |done, total| sink.lock().unwrap().push((done, total)))
    }

    // ==================== count_leaves Tests ====================

    #[test]
    fn test_count_leaves_scalars() {
        assert_eq!(count_leaves(&json!("text")), 1);
        assert_eq!(count_leaves(&json!(3)), 0);
        assert_eq!(count_leaves(&json!(true)), 0);
        assert_eq!(count_leaves(&json!(null)), 0);
    }

    #[test]
    fn test_count_leaves_nested() {
        let value = json!({"greet": "Hi", "list": ["Yes", "No", 3], "meta": {"n": null}});
        assert_eq!(count_leaves(&value), 3);
    }

    #[test]
    fn test_count_leaves_empty_containers() {
        assert_eq!(count_leaves(&json!({})), 0);
        assert_eq!(count_leaves(&json!([[], {}])), 0);
    }

    // ==================== Scenario Tests ====================

    #[tokio::test]
    async fn test_flat_object() {
        let provider = TableProvider::new(&[("Hello", "Bonjour")]);
        let (events, on_progress) = recorder();

        let result = translate_tree(
            &provider,
            &json!({"a": "Hello", "b": 5, "c": null}),
            "fr",
            on_progress,
        )
        .await
        .unwrap();

        assert_eq!(result, json!({"a": "Bonjour", "b": 5, "c": null}));
        assert_eq!(*events.lock().unwrap(), vec![(1, 1)]);
    }

    #[tokio::test]
    async fn test_nested_mix_keeps_array_order() {
        let (events, on_progress) = recorder();
        let input = json!({"greet": "Hi", "list": ["Yes", "No", 3]});

        let result = translate_tree(&SlowTaggingProvider, &input, "de", on_progress)
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({"greet": "<de:Hi>", "list": ["<de:Yes>", "<de:No>", 3]})
        );

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|(_, total)| *total == 3));
        assert_eq!(events.last(), Some(&(3, 3)));
    }

    #[tokio::test]
    async fn test_object_key_order_preserved() {
        let input: Value =
            serde_json::from_str(r#"{"zeta": "z", "alpha": "a", "mid": {"y": "y", "b": "b"}}"#)
                .unwrap();

        let result = translate_tree(&SlowTaggingProvider, &input, "fr", |_, _| {})
            .await
            .unwrap();

        let keys: Vec<_> = result.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        let inner: Vec<_> = result["mid"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(inner, vec!["y", "b"]);
    }

    #[tokio::test]
    async fn test_keys_are_not_translated() {
        let provider = TableProvider::new(&[("Hello", "Bonjour")]);

        let result = translate_tree(&provider, &json!({"Hello": "Hello"}), "fr", |_, _| {})
            .await
            .unwrap();

        assert_eq!(result, json!({"Hello": "Bonjour"}));
    }

    #[tokio::test]
    async fn test_scalar_root_string() {
        let provider = TableProvider::new(&[("Yes", "Oui")]);
        let result = translate_tree(&provider, &json!("Yes"), "fr", |_, _| {})
            .await
            .unwrap();
        assert_eq!(result, json!("Oui"));
    }

    #[tokio::test]
    async fn test_no_string_leaves_emits_no_progress() {
        let (events, on_progress) = recorder();
        let input = json!({"n": 1, "b": [true, null, 2.5]});

        let result = translate_tree(&FailingProvider, &input, "fr", on_progress)
            .await
            .unwrap();

        assert_eq!(result, input);
        assert!(events.lock().unwrap().is_empty());
    }

    // ==================== Fallback Tests ====================

    #[tokio::test]
    async fn test_failing_provider_is_identity() {
        let (events, on_progress) = recorder();
        let input = json!({"a": "one", "b": ["two", {"c": "three"}], "d": 4});

        let translated = translate_tree_with(
            &FailingProvider,
            &input,
            "fr",
            &TraversalOptions::new(),
            on_progress,
        )
        .await
        .unwrap();

        assert_eq!(translated.value, input);
        assert_eq!(translated.report.api_calls, 3);
        assert_eq!(translated.report.api_failures, 3);
        assert_eq!(events.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_partial_failure_only_affects_failed_leaves() {
        let provider = TableProvider::new(&[("Yes", "Sí")]);

        let result = translate_tree(&provider, &json!(["Yes", "Maybe"]), "es", |_, _| {})
            .await
            .unwrap();

        assert_eq!(result, json!(["Sí", "Maybe"]));
    }

    #[tokio::test]
    async fn test_blank_strings_count_as_leaves() {
        let (events, on_progress) = recorder();

        let translated = translate_tree_with(
            &FailingProvider,
            &json!(["", " "]),
            "fr",
            &TraversalOptions::new(),
            on_progress,
        )
        .await
        .unwrap();

        assert_eq!(translated.value, json!(["", " "]));
        assert_eq!(translated.report.skipped, 2);
        assert_eq!(translated.report.api_calls, 0);
        assert_eq!(events.lock().unwrap().last(), Some(&(2, 2)));
    }

    // ==================== Cancellation & Timeout Tests ====================

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let (events, on_progress) = recorder();

        let result = translate_tree_with(
            &SlowTaggingProvider,
            &json!({"a": "x"}),
            "fr",
            &TraversalOptions::new().with_cancel(cancel),
            on_progress,
        )
        .await;

        assert!(matches!(result, Err(TranslateError::Cancelled)));
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_during_traversal() {
        let cancel = CancelFlag::new();
        let provider = CancellingProvider {
            cancel: cancel.clone(),
        };

        // Nested containers are dispatched after the first leaf has run
        let input = json!(["first", ["second", ["third"]]]);
        let result = translate_tree_with(
            &provider,
            &input,
            "fr",
            &TraversalOptions::new().with_cancel(cancel.clone()),
            |_, _| {},
        )
        .await;

        assert!(cancel.is_cancelled());
        assert!(matches!(result, Err(TranslateError::Cancelled)));
    }

    #[tokio::test]
    async fn test_overall_timeout() {
        let result = translate_tree_with(
            &StalledProvider,
            &json!(["stuck"]),
            "fr",
            &TraversalOptions::new().with_timeout(Duration::from_millis(50)),
            |_, _| {},
        )
        .await;

        assert!(matches!(result, Err(TranslateError::TimedOut(_))));
    }

    #[tokio::test]
    async fn test_timeout_not_hit() {
        let translated = translate_tree_with(
            &SlowTaggingProvider,
            &json!(["quick"]),
            "fr",
            &TraversalOptions::new().with_timeout(Duration::from_secs(5)),
            |_, _| {},
        )
        .await
        .unwrap();

        assert_eq!(translated.value, json!(["<fr:quick>"]));
    }

    // ==================== Concurrency Tests ====================

    #[tokio::test]
    async fn test_siblings_run_concurrently() {
        // 20 leaves at ~50ms each would take a second if serialized
        let input = Value::Array((0..20).map(|i| json!(format!("s{}", i))).collect());

        let start = std::time::Instant::now();
        translate_tree(&SlowTaggingProvider, &input, "fr", |_, _| {})
            .await
            .unwrap();

        assert!(
            start.elapsed() < Duration::from_millis(500),
            "Siblings should overlap, took {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn test_cancel_flag_clones_share_state() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }
}
