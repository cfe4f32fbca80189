//! Line classification.
//!
//! A v6 config line is one of five things. The tests run in a fixed order:
//!
//! ```text
//! no '='                        -> Weight           "pt_0 -1"
//! tm = ...                      -> Tm               "tm = thrax pt 12 grammar.gz"
//! lm = ...                      -> Lm               "lm = kenlm 5 true false 100 lm.kenlm"
//! feature[-_]function = ...     -> FeatureFunction  "feature-function = OOVPenalty"
//! anything else with '='        -> Scalar           "top-n = 0"
//! ```
//!
//! A declaration keyword must be followed by optional whitespace and `=`, so
//! `tm_owner = pt` or `lmfile = x` are ordinary scalar options.

use crate::error::{LineError, MalformedLine};
use std::fmt;

/// Which handler a line was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCategory {
    Scalar,
    Weight,
    Grammar,
    LanguageModel,
    FeatureFunction,
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineCategory::Scalar => "option",
            LineCategory::Weight => "weight",
            LineCategory::Grammar => "tm",
            LineCategory::LanguageModel => "lm",
            LineCategory::FeatureFunction => "feature",
        })
    }
}

/// A classified line, borrowing from the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `key = value`; the key is not yet normalized.
    Scalar { key: &'a str, value: &'a str },
    /// `name value`
    Weight { name: &'a str, value: &'a str },
    Tm(&'a str),
    Lm(&'a str),
    FeatureFunction(&'a str),
}

impl Line<'_> {
    pub(crate) fn category(&self) -> LineCategory {
        match self {
            Line::Scalar { .. } => LineCategory::Scalar,
            Line::Weight { .. } => LineCategory::Weight,
            Line::Tm(_) => LineCategory::Grammar,
            Line::Lm(_) => LineCategory::LanguageModel,
            Line::FeatureFunction(_) => LineCategory::FeatureFunction,
        }
    }
}

/// Classify one raw input line. Blank and comment lines yield `Ok(None)`.
///
/// Surrounding whitespace is ignored, so an indented `# ...` is a comment and
/// an indented `tm = ...` is still a declaration.
pub(crate) fn classify(raw: &str) -> Result<Option<Line<'_>>, LineError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if !line.contains('=') {
        let caps = regex!(r"^(\S+)\s+(.+)$")
            .captures(line)
            .ok_or_else(|| MalformedLine::WeightWithoutValue(line.to_string()))?;
        let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
            return Err(MalformedLine::WeightWithoutValue(line.to_string()).into());
        };
        return Ok(Some(Line::Weight { name: name.as_str(), value: value.as_str() }));
    }

    if let Some(caps) = regex!(r"^(tm|lm|feature[-_]function)\s*=\s*(.*)$").captures(line) {
        let body = caps.get(2).map_or("", |m| m.as_str());
        let declaration = match &caps[1] {
            "tm" => Line::Tm(body),
            "lm" => Line::Lm(body),
            _ => Line::FeatureFunction(body),
        };
        if body.is_empty() {
            let keyword = match declaration {
                Line::Tm(_) => "tm",
                Line::Lm(_) => "lm",
                _ => "feature_function",
            };
            return Err(MalformedLine::EmptyDeclaration(keyword).into());
        }
        return Ok(Some(declaration));
    }

    let (key, value) = match regex!(r"^(.*?)\s*=\s*(.*)$").captures(line) {
        Some(caps) => (caps.get(1).map_or("", |m| m.as_str()), caps.get(2).map_or("", |m| m.as_str())),
        None => ("", ""),
    };
    if key.is_empty() {
        return Err(MalformedLine::EmptyKey.into());
    }
    Ok(Some(Line::Scalar { key, value }))
}
