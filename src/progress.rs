//! Progress values and user-facing status lines.
//!
//! The traverser reports `(completed, total)` once per string leaf. These
//! helpers turn that into percentages and messages for a collaborator.

use crate::i18n::Language;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Completed leaves out of the precomputed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Rounded percentage. A document without string leaves is complete.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as usize
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Translation: {}% ({}/{})",
            self.percent(),
            self.completed,
            self.total
        )
    }
}

/// States a translation run moves through, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationStatus {
    Started { leaves: usize, language: Language },
    InProgress(Progress),
    Completed { leaves: usize },
    InvalidInput(String),
    Failed,
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationStatus::Started { leaves, language } => write!(
                f,
                "Translating {} strings to {}...",
                leaves,
                language.code()
            ),
            TranslationStatus::InProgress(progress) => write!(f, "{}", progress),
            TranslationStatus::Completed { leaves } => {
                write!(f, "✅ Translated {} strings successfully.", leaves)
            }
            TranslationStatus::InvalidInput(reason) => write!(f, "❌ Invalid JSON: {}", reason),
            TranslationStatus::Failed => f.write_str("❌ Translation failed"),
        }
    }
}

/// Drops progress events that would not change the displayed percentage.
///
/// Safe to share between concurrently completing leaves.
#[derive(Debug, Default)]
pub struct ProgressThrottle {
    // Last emitted percent + 1, so zero means nothing emitted yet
    last_shown: AtomicUsize,
}

impl ProgressThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `progress` shows a higher percentage than anything
    /// emitted so far.
    pub fn should_emit(&self, progress: Progress) -> bool {
        let marker = progress.percent() + 1;
        self.last_shown.fetch_max(marker, Ordering::SeqCst) < marker
    }
}
