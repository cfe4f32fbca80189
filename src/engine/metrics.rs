//! Migration run metrics.
//!
//! A [`Session`](super::Session) always counts what it saw and how long it
//! took. The per-line trace is opt-in (`Session::collect_trace`) because it
//! allocates a summary string for every line; the CLI turns it on for
//! `--explain`.

use super::classify::LineCategory;
use std::time::Duration;

/// How many lines landed in each category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoryCounts {
    /// Blank and comment lines.
    pub skipped: usize,
    pub scalars: usize,
    /// Weight lines read, including ones that later got overridden.
    pub weights: usize,
    /// Weight lines that replaced an earlier value for the same name.
    pub weight_overrides: usize,
    pub grammars: usize,
    pub language_models: usize,
    pub feature_functions: usize,
}

impl CategoryCounts {
    pub(crate) fn record(&mut self, category: LineCategory) {
        match category {
            LineCategory::Scalar => self.scalars += 1,
            LineCategory::Weight => self.weights += 1,
            LineCategory::Grammar => self.grammars += 1,
            LineCategory::LanguageModel => self.language_models += 1,
            LineCategory::FeatureFunction => self.feature_functions += 1,
        }
    }
}

/// One migrated line, for `--explain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// 1-based input line number.
    pub line: usize,
    pub category: LineCategory,
    /// What the line became, e.g. `span_limit = 20` or a rendered record.
    pub summary: String,
}

/// Outcome of a completed session.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total lines read, including skipped ones.
    pub lines: usize,
    pub counts: CategoryCounts,
    /// Per-line trace; empty unless tracing was requested.
    pub trace: Vec<TraceEntry>,
    /// Wall time from session creation to the end of `finish`.
    pub total: Duration,
}
