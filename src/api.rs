use crate::engine::{FsProbe, RunMetrics, Session};
use crate::error::MigrateError;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Options that affect a migration run.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Directory that relative grammar paths are resolved against when
    /// probing for packed grammars. `None` means the current directory.
    pub base_dir: Option<PathBuf>,
    /// Collect a per-line [`TraceEntry`](crate::TraceEntry) trace.
    pub explain: bool,
}

/// Migrate a whole v6 config held in memory, probing paths relative to the
/// current directory.
pub fn migrate_str(input: &str) -> Result<String, MigrateError> {
    migrate_str_with(input, &Options::default())
}

/// Migrate a whole v6 config held in memory with explicit `options`.
pub fn migrate_str_with(input: &str, options: &Options) -> Result<String, MigrateError> {
    let mut out = Vec::new();
    migrate_stream(input.as_bytes(), &mut out, options)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Migrate line by line from `reader` to `writer`.
///
/// Scalar options reach `writer` as soon as they are read; the grouped blocks
/// follow once `reader` is exhausted. On error whatever was already written
/// stays written.
pub fn migrate_stream<R: BufRead, W: Write>(reader: R, writer: W, options: &Options) -> Result<RunMetrics, MigrateError> {
    let probe = FsProbe::new(options.base_dir.clone());
    let mut session = Session::new(writer, probe).collect_trace(options.explain);

    for line in reader.lines() {
        session.feed(&line?)?;
    }

    session.finish()
}
