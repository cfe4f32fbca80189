//! Fixed-arity declaration bodies from the oldest config format.
//!
//! ```text
//! tm = TYPE OWNER MAXLEN PATH
//! lm = TYPE ORDER LEFT RIGHT DEFAULT PATH
//! ```

use super::infer::{PathProbe, Shape, infer_grammar_class};
use crate::error::{LineError, MalformedLine};
use crate::{ComponentClass, Declaration, GrammarType};

pub(crate) fn parse_positional_tm(fields: &[&str], probe: &dyn PathProbe) -> Result<Declaration, LineError> {
    let &[tag, owner, max_len, path] = fields else {
        return Err(MalformedLine::Arity { kind: "tm", expected: 4, found: fields.len() }.into());
    };

    let class = infer_grammar_class(&GrammarType::parse(tag), Some(path), Shape::Positional, probe)?;
    let mut decl = Declaration::new(class);
    decl.set("owner", owner);
    decl.set("span_limit", max_len);
    decl.set("path", path);
    Ok(decl)
}

/// RIGHT and DEFAULT are accepted but have no v7 counterpart.
pub(crate) fn parse_positional_lm(fields: &[&str]) -> Result<Declaration, LineError> {
    let &[lm_type, order, left_state, _right_state, _default, path] = fields else {
        return Err(MalformedLine::Arity { kind: "lm", expected: 6, found: fields.len() }.into());
    };

    let class = if left_state == "true" {
        ComponentClass::StateMinimizingLanguageModel
    } else {
        ComponentClass::LanguageModel
    };
    let mut decl = Declaration::new(class);
    decl.set("lm_type", lm_type);
    decl.set("lm_order", order);
    decl.set("lm_file", path);
    Ok(decl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StaticProbe;

    fn split(body: &str) -> Vec<&str> {
        body.split_whitespace().collect()
    }

    #[test]
    fn old_tm_quad() {
        let probe = StaticProbe::default();
        let decl = parse_positional_tm(&split("thrax pt 20 src/test/resources/wa_grammar"), &probe).unwrap();

        assert_eq!(decl.class, ComponentClass::TextGrammar);
        assert_eq!(
            decl.fields().collect::<Vec<_>>(),
            vec![("owner", "pt"), ("span_limit", "20"), ("path", "src/test/resources/wa_grammar")]
        );
    }

    #[test]
    fn old_tm_classes() {
        let probe = StaticProbe::with_dirs(&["grammar.packed"]);
        let class = |body| parse_positional_tm(&split(body), &probe).map(|d| d.class);

        assert_eq!(class("thrax pt 20 grammar.packed"), Ok(ComponentClass::PackedGrammar));
        assert_eq!(class("hiero glue -1 grammar.glue"), Ok(ComponentClass::TextGrammar));
        assert_eq!(class("phrase pt 0 grammar.packed"), Ok(ComponentClass::PhraseTable));
        assert_eq!(class("moses pt 0 phrase-table.gz"), Err(LineError::UnsupportedMoses));
    }

    #[test]
    fn old_tm_packed_grammar_has_no_cache_size() {
        let probe = StaticProbe::with_dirs(&["grammar.packed"]);
        let decl = parse_positional_tm(&split("thrax pt 20 grammar.packed"), &probe).unwrap();
        assert_eq!(decl.get("rule_cache_size"), None);
    }

    #[test]
    fn old_lm_sextuple() {
        let decl = parse_positional_lm(&split("kenlm 5 true false 100 lm.kenlm")).unwrap();
        assert_eq!(decl.class, ComponentClass::StateMinimizingLanguageModel);
        assert_eq!(
            decl.fields().collect::<Vec<_>>(),
            vec![("lm_type", "kenlm"), ("lm_order", "5"), ("lm_file", "lm.kenlm")]
        );

        for left in ["false", "True", "1", "yes"] {
            let body = format!("berkeleylm 3 {left} false 100 lm.gz");
            let decl = parse_positional_lm(&split(&body)).unwrap();
            assert_eq!(decl.class, ComponentClass::LanguageModel, "LEFT = {left}");
        }
    }

    #[test]
    fn wrong_field_counts() {
        let probe = StaticProbe::default();
        assert_eq!(
            parse_positional_tm(&split("thrax pt 20"), &probe),
            Err(LineError::Malformed(MalformedLine::Arity { kind: "tm", expected: 4, found: 3 }))
        );
        assert_eq!(
            parse_positional_lm(&split("kenlm 5 true false 100 lm.kenlm extra")),
            Err(LineError::Malformed(MalformedLine::Arity { kind: "lm", expected: 6, found: 7 }))
        );
    }
}
