//! Translation metrics for one translation run.
//!
//! Counts provider calls, provider failures (leaves that fell back to their
//! original text) and leaves that never needed a call.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by the concurrent leaf translations of one run.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of calls made to the translation provider
    api_calls: AtomicUsize,

    /// Number of provider calls that failed
    api_failures: AtomicUsize,

    /// Number of blank strings returned without a provider call
    skipped: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call to the translation provider.
    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed provider call.
    pub fn record_api_failure(&self) {
        self.api_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a leaf that did not need a provider call.
    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn api_failures(&self) -> usize {
        self.api_failures.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let calls = self.api_calls();
        let failures = self.api_failures();
        let api_success_rate = if calls > 0 {
            ((calls - failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            api_calls: calls,
            api_failures: failures,
            skipped: self.skipped(),
            api_success_rate,
        }
    }
}

/// Metrics report for a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Number of API calls made
    pub api_calls: usize,

    /// Number of API failures (leaves left untranslated)
    pub api_failures: usize,

    /// Number of leaves that needed no API call
    pub skipped: usize,

    /// API success rate as a percentage (0-100)
    pub api_success_rate: f64,
}

impl MetricsReport {
    /// Total string leaves accounted for.
    pub fn leaves(&self) -> usize {
        self.api_calls + self.skipped
    }
}
