//! Declaration body shapes.
//!
//! The same `tm` entity was written two ways over time, told apart only by
//! whether a `-path` token appears:
//!
//! ```text
//! tm = thrax pt 12 grammar.gz                      Positional
//! tm = thrax -owner pt -maxspan 12 -path grammar   Flagged
//! ```
//!
//! [`DeclarationBody::of`] makes that call once; each shape has its own parser.

use super::flagged::{Role, parse_flagged};
use super::infer::PathProbe;
use super::positional::{parse_positional_lm, parse_positional_tm};
use crate::Declaration;
use crate::error::{LineError, MalformedLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DeclarationBody<'a> {
    Positional(Vec<&'a str>),
    Flagged(&'a str),
}

impl<'a> DeclarationBody<'a> {
    pub(crate) fn of(body: &'a str) -> Self {
        if body.split_whitespace().any(|token| token == "-path") {
            DeclarationBody::Flagged(body)
        } else {
            DeclarationBody::Positional(body.split_whitespace().collect())
        }
    }
}

pub(crate) fn grammar_declaration(body: &str, probe: &dyn PathProbe) -> Result<Declaration, LineError> {
    match DeclarationBody::of(body) {
        DeclarationBody::Flagged(body) => parse_flagged(body, Role::Grammar(probe)),
        DeclarationBody::Positional(fields) => parse_positional_tm(&fields, probe),
    }
}

pub(crate) fn language_model_declaration(body: &str) -> Result<Declaration, LineError> {
    match DeclarationBody::of(body) {
        DeclarationBody::Flagged(_) => Err(MalformedLine::FlaggedLanguageModel.into()),
        DeclarationBody::Positional(fields) => parse_positional_lm(&fields),
    }
}

/// Feature functions are always flag-style, `-path` or not.
pub(crate) fn feature_declaration(body: &str) -> Result<Declaration, LineError> {
    parse_flagged(body, Role::Feature)
}
