//! Migrates legacy (v6) line-oriented decoder configurations into the grouped
//! v7 format.
//!
//! The v6 format accumulated several ambiguous shapes for the same entity
//! (positional vs. flag-style grammar declarations, positional language
//! models, feature functions, bare weight lines). A [`Session`] reads the old
//! config one line at a time, prints plain options immediately, and buffers
//! declarations and weights until [`Session::finish`] writes them as the
//! `feature_functions`, `grammars` and `weights` blocks.
//!
//! ```
//! let out = sevenize::migrate_str("maxspan = 20\npt_0 -1\n").unwrap();
//! assert!(out.starts_with("span_limit = 20\n"));
//! assert!(out.contains("weights = {\n  pt_0 = -1\n}"));
//! ```

use indexmap::IndexMap;
use std::fmt;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;


pub use api::{Options, migrate_str, migrate_str_with, migrate_stream};
pub use engine::{CategoryCounts, FsProbe, LineCategory, PathProbe, RunMetrics, Session, TraceEntry};
pub use error::{LineError, MalformedLine, MigrateError, PHRASE_TABLE_CONVERTER};

// --- Canonical model ---------------------------------------------------------

/// Component class written as the `class` key of every emitted record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentClass {
    /// Packed (binarized, directory-backed) grammar.
    PackedGrammar,
    /// Plain-text grammar file.
    TextGrammar,
    /// Phrase-based translation table.
    PhraseTable,
    /// Language model that minimizes its left state.
    StateMinimizingLanguageModel,
    LanguageModel,
    /// Any other feature function; the name is passed through verbatim.
    Feature(String),
}

impl ComponentClass {
    pub fn as_str(&self) -> &str {
        match self {
            ComponentClass::PackedGrammar => "PackedGrammar",
            ComponentClass::TextGrammar => "TextGrammar",
            ComponentClass::PhraseTable => "PhraseTable",
            ComponentClass::StateMinimizingLanguageModel => "StateMinimizingLanguageModel",
            ComponentClass::LanguageModel => "LanguageModel",
            ComponentClass::Feature(name) => name,
        }
    }
}

impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The legacy `TYPE` tag that opens a grammar declaration body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarType {
    Thrax,
    Hiero,
    /// Moses phrase tables must be converted before migration.
    Moses,
    Phrase,
    Other(String),
}

impl GrammarType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "thrax" => GrammarType::Thrax,
            "hiero" => GrammarType::Hiero,
            "moses" => GrammarType::Moses,
            "phrase" => GrammarType::Phrase,
            other => GrammarType::Other(other.to_string()),
        }
    }

    /// Types whose directory-backed grammars are loaded as packed grammars.
    pub fn packable(&self) -> bool {
        matches!(self, GrammarType::Thrax | GrammarType::Hiero)
    }
}

/// One migrated declaration: a class plus its canonical key/value fields.
///
/// Fields keep the order in which they were parsed. `class` is held outside
/// the field map so a record always carries exactly one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub class: ComponentClass,
    fields: IndexMap<String, String>,
}

impl Declaration {
    pub fn new(class: ComponentClass) -> Self {
        Declaration { class, fields: IndexMap::new() }
    }

    /// Set `key` to `value`, overwriting an earlier value in place.
    ///
    /// A `class` key is ignored: the class is decided by the parser.
    pub(crate) fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key == "class" {
            tracing::debug!("ignoring explicit class field");
            return;
        }
        self.fields.insert(key, value.into());
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.fields.shift_remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Fields in parse order, excluding `class`.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ class = {}", self.class)?;
        for (key, value) in self.fields() {
            write!(f, ", {key} = {value}")?;
        }
        f.write_str(" }")
    }
}

/// Output block a declaration is accumulated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    FeatureFunctions,
    Grammars,
}

impl Group {
    pub fn label(self) -> &'static str {
        match self {
            Group::FeatureFunctions => "feature_functions",
            Group::Grammars => "grammars",
        }
    }
}
