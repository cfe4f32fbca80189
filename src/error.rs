//! Error types.
//!
//! Only two things stop a migration early: a grammar type that has no v7
//! equivalent (`moses`), and a line whose shape cannot be read. Everything
//! else, including a grammar path that does not exist, is migrated as-is.

use std::io;
use std::path::PathBuf;

/// Companion script that converts a Moses phrase table into the `phrase` format.
pub const PHRASE_TABLE_CONVERTER: &str = "scripts/support/phrase2hiero.py";

/// Top-level migration error.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// A specific input line could not be migrated (1-based line number).
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: LineError,
    },

    /// The input file could not be opened.
    #[error("failed to open input '{}': {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl MigrateError {
    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            MigrateError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Why a single line failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error(
        "moses grammars are not supported; convert the phrase table with {} first and change its type to 'phrase'",
        PHRASE_TABLE_CONVERTER
    )]
    UnsupportedMoses,

    #[error(transparent)]
    Malformed(#[from] MalformedLine),
}

/// Shape violations detected while reading a line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedLine {
    #[error("weight '{0}' has no value")]
    WeightWithoutValue(String),

    #[error("option line has an empty key")]
    EmptyKey,

    #[error("'{0}' declaration has an empty body")]
    EmptyDeclaration(&'static str),

    #[error("positional '{kind}' declaration expects {expected} fields, found {found}")]
    Arity { kind: &'static str, expected: usize, found: usize },

    #[error("expected a '-key' flag, found '{0}'")]
    NotAFlag(String),

    #[error("flag '{0}' has no value")]
    DanglingFlag(String),

    #[error("'lm' declarations only accept the positional form: TYPE ORDER LEFT RIGHT DEFAULT PATH")]
    FlaggedLanguageModel,
}
