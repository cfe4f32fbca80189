//! Flag-style declaration bodies: `TYPE -key value -key value ...`.
//!
//! Used for every `feature-function` line and for `tm` lines that carry a
//! `-path` flag. For grammars the class is inferred once the path is seen;
//! for feature functions `TYPE` is the class name itself.

use super::infer::{PACKED_RULE_CACHE_SIZE, PathProbe, Shape, infer_grammar_class};
use super::normalize::normalize_key;
use crate::error::{LineError, MalformedLine};
use crate::{ComponentClass, Declaration, GrammarType};

/// What the flag-style body declares.
#[derive(Clone, Copy)]
pub(crate) enum Role<'p> {
    Grammar(&'p dyn PathProbe),
    Feature,
}

pub(crate) fn parse_flagged(body: &str, role: Role<'_>) -> Result<Declaration, LineError> {
    let mut tokens = body.split_whitespace();
    let tag = tokens.next().ok_or(MalformedLine::EmptyDeclaration(match role {
        Role::Grammar(_) => "tm",
        Role::Feature => "feature_function",
    }))?;
    let rest: Vec<&str> = tokens.collect();

    let grammar_type = GrammarType::parse(tag);
    // Placeholder until a path (or the end of the body) settles it.
    let mut decl = Declaration::new(match role {
        Role::Grammar(_) => ComponentClass::TextGrammar,
        Role::Feature => ComponentClass::Feature(tag.to_string()),
    });
    let mut inferred = None;
    // Set when `rule_cache_size` came from packing rather than from the body.
    let mut cache_size_inferred = false;

    for pair in rest.chunks(2) {
        let &[flag, value] = pair else {
            return Err(MalformedLine::DanglingFlag(pair[0].to_string()).into());
        };
        let raw_key = flag.strip_prefix('-').ok_or_else(|| MalformedLine::NotAFlag(flag.to_string()))?;

        let key = match role {
            // `-maxlen` is the flag spelling of the positional MAXLEN field.
            Role::Grammar(_) if raw_key == "maxlen" => "span_limit".to_string(),
            _ => normalize_key(raw_key),
        };

        if let Role::Grammar(probe) = role {
            if key == "path" {
                let class = infer_grammar_class(&grammar_type, Some(value), Shape::Flagged, probe)?;
                decl.set("path", value);
                if class == ComponentClass::PackedGrammar {
                    if decl.get("rule_cache_size").is_none() {
                        decl.set("rule_cache_size", PACKED_RULE_CACHE_SIZE);
                        cache_size_inferred = true;
                    }
                } else if cache_size_inferred {
                    decl.remove("rule_cache_size");
                    cache_size_inferred = false;
                }
                inferred = Some(class);
                continue;
            }
        }

        if key == "rule_cache_size" {
            cache_size_inferred = false;
        }
        decl.set(key, value);
    }

    if let Role::Grammar(probe) = role {
        decl.class = match inferred {
            Some(class) => class,
            None => infer_grammar_class(&grammar_type, None, Shape::Flagged, probe)?,
        };
    }

    Ok(decl)
}
