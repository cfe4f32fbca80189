//! One migration run.
//!
//! A `Session` owns everything a run needs: the output sink, the directory
//! probe and the three accumulators. Nothing is global; construct one per
//! input, [`feed`](Session::feed) it lines, then [`finish`](Session::finish).
//!
//! Scalar options are written the moment they are read. If a later line
//! fails, those lines stay on the stream and the accumulated blocks are never
//! written.

use super::body::{feature_declaration, grammar_declaration, language_model_declaration};
use super::classify::{Line, LineCategory, classify};
use super::emit;
use super::infer::PathProbe;
use super::metrics::{RunMetrics, TraceEntry};
use super::normalize::normalize_key;
use crate::error::{LineError, MigrateError};
use crate::{Declaration, Group};
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Instant;

#[derive(Debug)]
pub struct Session<W: Write, P: PathProbe> {
    out: W,
    probe: P,
    feature_functions: Vec<Declaration>,
    grammars: Vec<Declaration>,
    /// Last write wins; `BTreeMap` gives the sorted emission order.
    weights: BTreeMap<String, String>,
    metrics: RunMetrics,
    collect_trace: bool,
    started: Instant,
}

impl<W: Write, P: PathProbe> Session<W, P> {
    pub fn new(out: W, probe: P) -> Self {
        Session {
            out,
            probe,
            feature_functions: Vec::new(),
            grammars: Vec::new(),
            weights: BTreeMap::new(),
            metrics: RunMetrics::default(),
            collect_trace: false,
            started: Instant::now(),
        }
    }

    /// Record a [`TraceEntry`] for every migrated line.
    pub fn collect_trace(mut self, enabled: bool) -> Self {
        self.collect_trace = enabled;
        self
    }

    /// Migrate one raw input line.
    pub fn feed(&mut self, raw: &str) -> Result<(), MigrateError> {
        self.metrics.lines += 1;
        let line_no = self.metrics.lines;
        let at = |source: LineError| MigrateError::Line { line: line_no, source };

        let Some(line) = classify(raw).map_err(at)? else {
            self.metrics.counts.skipped += 1;
            return Ok(());
        };
        let category = line.category();
        tracing::debug!(line = line_no, %category, "classified");

        match line {
            Line::Scalar { key, value } => {
                let key = normalize_key(key);
                emit::write_scalar(&mut self.out, &key, value)?;
                self.trace(line_no, category, || format!("{key} = {value}"));
            }
            Line::Weight { name, value } => {
                if let Some(previous) = self.weights.insert(name.to_string(), value.to_string()) {
                    tracing::debug!(line = line_no, name, previous = %previous, value, "weight overridden");
                    self.metrics.counts.weight_overrides += 1;
                }
                self.trace(line_no, category, || format!("{name} = {value}"));
            }
            Line::Tm(body) => {
                let decl = grammar_declaration(body, &self.probe).map_err(at)?;
                self.push(Group::Grammars, decl, line_no, category);
            }
            Line::Lm(body) => {
                let decl = language_model_declaration(body).map_err(at)?;
                self.push(Group::FeatureFunctions, decl, line_no, category);
            }
            Line::FeatureFunction(body) => {
                let decl = feature_declaration(body).map_err(at)?;
                self.push(Group::FeatureFunctions, decl, line_no, category);
            }
        }

        self.metrics.counts.record(category);
        Ok(())
    }

    /// Write the accumulated blocks and return the run metrics.
    pub fn finish(mut self) -> Result<RunMetrics, MigrateError> {
        emit::write_blocks(&mut self.out, &self.feature_functions, &self.grammars, &self.weights)?;
        self.out.flush()?;

        self.metrics.total = self.started.elapsed();
        tracing::info!(
            lines = self.metrics.lines,
            feature_functions = self.feature_functions.len(),
            grammars = self.grammars.len(),
            weights = self.weights.len(),
            elapsed = ?self.metrics.total,
            "migration finished"
        );
        Ok(self.metrics)
    }

    pub fn feature_functions(&self) -> &[Declaration] {
        &self.feature_functions
    }

    pub fn grammars(&self) -> &[Declaration] {
        &self.grammars
    }

    pub fn weights(&self) -> &BTreeMap<String, String> {
        &self.weights
    }

    fn push(&mut self, group: Group, decl: Declaration, line_no: usize, category: LineCategory) {
        tracing::debug!(line = line_no, group = group.label(), class = %decl.class, "declaration");
        self.trace(line_no, category, || decl.to_string());
        match group {
            Group::FeatureFunctions => self.feature_functions.push(decl),
            Group::Grammars => self.grammars.push(decl),
        }
    }

    fn trace(&mut self, line: usize, category: LineCategory, summary: impl FnOnce() -> String) {
        if self.collect_trace {
            self.metrics.trace.push(TraceEntry { line, category, summary: summary() });
        }
    }
}
