//! Output format.
//!
//! ```text
//! top_n = 0                                   <- scalar options, as they are read
//! span_limit = 20
//!
//! feature_functions = [
//!   { class = OOVPenalty }
//! ]
//!
//! grammars = [
//!   { class = TextGrammar, owner = pt, span_limit = 20, path = grammar.gz }
//! ]
//!
//! weights = {
//!   OOVPenalty = 2
//!   pt_0 = -1
//! }
//! ```

use crate::{Declaration, Group};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Write a scalar option and flush so it reaches the stream right away.
pub(crate) fn write_scalar(out: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{key} = {value}")?;
    out.flush()
}

pub(crate) fn write_blocks(
    out: &mut impl Write,
    feature_functions: &[Declaration],
    grammars: &[Declaration],
    weights: &BTreeMap<String, String>,
) -> io::Result<()> {
    write_group(out, Group::FeatureFunctions, feature_functions)?;
    write_group(out, Group::Grammars, grammars)?;

    writeln!(out)?;
    writeln!(out, "weights = {{")?;
    for (name, value) in weights {
        writeln!(out, "  {name} = {value}")?;
    }
    writeln!(out, "}}")
}

fn write_group(out: &mut impl Write, group: Group, declarations: &[Declaration]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} = [", group.label())?;
    for decl in declarations {
        writeln!(out, "  {decl}")?;
    }
    writeln!(out, "]")
}
