//! Grammar class inference.
//!
//! The v6 config never says which grammar backend to load; it has to be
//! inferred from the declaration's `TYPE` tag and from whether its path is a
//! directory (packed grammars are directories, text grammars are files):
//!
//! ```text
//! TYPE     path is a directory?    class
//! moses    -                       error: convert with phrase2hiero first
//! phrase   -                       PhraseTable
//! thrax    yes                     PackedGrammar (+ rule_cache_size)
//! hiero    yes                     PackedGrammar (+ rule_cache_size)
//! other    -                       TextGrammar
//! ```
//!
//! Positional declarations predate the `thrax`/`hiero` gate: any
//! directory-backed positional grammar is packed.
//!
//! The directory test is the only filesystem access in the crate and sits
//! behind [`PathProbe`]. A path that does not exist is simply not a directory.

use crate::error::LineError;
use crate::{ComponentClass, GrammarType};
use std::path::{Path, PathBuf};

/// Rule cache size given to every packed grammar declared flag-style.
pub(crate) const PACKED_RULE_CACHE_SIZE: &str = "10000";

/// Answers "is this path a directory?" for grammar class inference.
pub trait PathProbe {
    fn is_dir(&self, path: &str) -> bool;
}

/// Probes the real filesystem, resolving relative paths against an optional
/// base directory (the current directory otherwise).
#[derive(Debug, Clone, Default)]
pub struct FsProbe {
    base_dir: Option<PathBuf>,
}

impl FsProbe {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        FsProbe { base_dir }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl PathProbe for FsProbe {
    fn is_dir(&self, path: &str) -> bool {
        let resolved = self.resolve(path);
        let is_dir = resolved.is_dir();
        tracing::debug!(path = %resolved.display(), is_dir, "probed grammar path");
        is_dir
    }
}

/// Which declaration shape the grammar came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Flagged,
    Positional,
}

/// Decide the class of a grammar declaration.
///
/// `path` is `None` for a flag-style body that never named one; the
/// type-based rules still apply.
pub(crate) fn infer_grammar_class(
    grammar_type: &GrammarType,
    path: Option<&str>,
    shape: Shape,
    probe: &dyn PathProbe,
) -> Result<ComponentClass, LineError> {
    let class = match grammar_type {
        GrammarType::Moses => return Err(LineError::UnsupportedMoses),
        GrammarType::Phrase => ComponentClass::PhraseTable,
        _ => {
            let gated = shape == Shape::Positional || grammar_type.packable();
            match path {
                Some(path) if gated && probe.is_dir(path) => ComponentClass::PackedGrammar,
                _ => ComponentClass::TextGrammar,
            }
        }
    };

    tracing::debug!(?grammar_type, ?shape, %class, "inferred grammar class");
    Ok(class)
}

/// In-memory probe for tests: only the listed paths are directories.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StaticProbe {
    dirs: std::collections::HashSet<String>,
}

#[cfg(test)]
impl StaticProbe {
    pub(crate) fn with_dirs(dirs: &[&str]) -> Self {
        StaticProbe { dirs: dirs.iter().map(|d| d.to_string()).collect() }
    }
}

#[cfg(test)]
impl PathProbe for StaticProbe {
    fn is_dir(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(tag: &str, path: &str, shape: Shape, probe: &StaticProbe) -> Result<ComponentClass, LineError> {
        infer_grammar_class(&GrammarType::parse(tag), Some(path), shape, probe)
    }

    #[test]
    fn flagged_inference_table() {
        let probe = StaticProbe::with_dirs(&["grammar.packed"]);
        let cases = [
            ("thrax", "grammar.packed", ComponentClass::PackedGrammar),
            ("hiero", "grammar.packed", ComponentClass::PackedGrammar),
            ("thrax", "grammar.gz", ComponentClass::TextGrammar),
            ("hiero", "grammar.gz", ComponentClass::TextGrammar),
            ("phrase", "grammar.packed", ComponentClass::PhraseTable),
            ("phrase", "grammar.gz", ComponentClass::PhraseTable),
            ("samt", "grammar.packed", ComponentClass::TextGrammar),
            ("samt", "grammar.gz", ComponentClass::TextGrammar),
        ];

        for (tag, path, expected) in cases {
            assert_eq!(infer(tag, path, Shape::Flagged, &probe), Ok(expected), "{tag} {path}");
        }
    }

    #[test]
    fn positional_directories_are_packed_for_any_type() {
        let probe = StaticProbe::with_dirs(&["grammar.packed"]);
        assert_eq!(infer("samt", "grammar.packed", Shape::Positional, &probe), Ok(ComponentClass::PackedGrammar));
        assert_eq!(infer("thrax", "grammar.gz", Shape::Positional, &probe), Ok(ComponentClass::TextGrammar));
        assert_eq!(infer("phrase", "grammar.packed", Shape::Positional, &probe), Ok(ComponentClass::PhraseTable));
    }

    // Moses and phrase are decided by type alone, not only inside the
    // thrax/hiero directory branch.
    #[test]
    fn moses_is_always_rejected() {
        let probe = StaticProbe::with_dirs(&["grammar.packed"]);
        for shape in [Shape::Flagged, Shape::Positional] {
            for path in ["grammar.packed", "grammar.gz"] {
                assert_eq!(infer("moses", path, shape, &probe), Err(LineError::UnsupportedMoses));
            }
        }
        assert_eq!(
            infer_grammar_class(&GrammarType::Moses, None, Shape::Flagged, &probe),
            Err(LineError::UnsupportedMoses)
        );
    }

    #[test]
    fn missing_path_falls_back_to_type_rules() {
        let probe = StaticProbe::default();
        assert_eq!(
            infer_grammar_class(&GrammarType::Thrax, None, Shape::Flagged, &probe),
            Ok(ComponentClass::TextGrammar)
        );
        assert_eq!(
            infer_grammar_class(&GrammarType::Phrase, None, Shape::Flagged, &probe),
            Ok(ComponentClass::PhraseTable)
        );
    }

    #[test]
    fn fs_probe_distinguishes_directories_files_and_missing_paths() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("grammar.packed")).unwrap();
        std::fs::write(root.path().join("grammar.gz"), b"").unwrap();

        let probe = FsProbe::new(Some(root.path().to_path_buf()));
        assert!(probe.is_dir("grammar.packed"));
        assert!(!probe.is_dir("grammar.gz"));
        assert!(!probe.is_dir("does/not/exist"));

        let absolute = root.path().join("grammar.packed");
        assert!(FsProbe::default().is_dir(absolute.to_str().unwrap()));
        assert!(FsProbe::new(Some(PathBuf::from("/nonexistent-base"))).is_dir(absolute.to_str().unwrap()));
    }
}
