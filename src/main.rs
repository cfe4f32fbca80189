mod debug_report;

use sevenize::{MigrateError, Options, RunMetrics, migrate_stream};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SEVENIZE_LOG";

fn main() {
    let config = match parse_args(std::env::args().skip(1), io::stderr().is_terminal()) {
        Ok(CliAction::Run(config)) => config,
        Ok(CliAction::Help) => {
            print_help();
            return;
        }
        Ok(CliAction::Version) => {
            println!("sevenize {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(err) => exit_with(Failure::Usage(err)),
    };

    init_tracing();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run(&config, &mut out);
    if let Err(err) = out.flush() {
        tracing::warn!("failed to flush stdout: {err}");
    }

    match result {
        Ok(metrics) => {
            if config.explain {
                debug_report::print_run(&config.source_label(), &metrics, config.color);
            }
        }
        Err(err) => exit_with(Failure::Migration(err)),
    }
}

/// Why the process stops with a non-zero status.
#[derive(Debug)]
enum Failure {
    /// Bad command line; the message is already formatted.
    Usage(String),
    Migration(MigrateError),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Usage(_) => 2,
            Failure::Migration(_) => 1,
        }
    }

    fn message(&self) -> String {
        match self {
            Failure::Usage(message) => message.clone(),
            Failure::Migration(err) => format!("error: {err}"),
        }
    }
}

fn exit_with(failure: Failure) -> ! {
    eprintln!("{}", failure.message());
    std::process::exit(failure.exit_code());
}

fn run(config: &CliConfig, out: &mut impl Write) -> Result<RunMetrics, MigrateError> {
    let options = Options { base_dir: config.base_dir.clone(), explain: config.explain };
    match &config.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| MigrateError::Input { path: path.clone(), source })?;
            migrate_stream(BufReader::new(file), out, &options)
        }
        None => migrate_stream(io::stdin().lock(), out, &options),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

#[derive(Debug, PartialEq, Eq)]
enum CliAction {
    Run(CliConfig),
    Help,
    Version,
}

#[derive(Debug, PartialEq, Eq)]
struct CliConfig {
    input: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    explain: bool,
    color: bool,
}

impl CliConfig {
    fn source_label(&self) -> String {
        match &self.input {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        }
    }
}

/// Parse the arguments after the program name. `color` is the default for
/// the report when neither `--color` nor `--no-color` is given.
fn parse_args(args: impl IntoIterator<Item = String>, color: bool) -> Result<CliAction, String> {
    let mut input: Option<PathBuf> = None;
    let mut base_dir: Option<PathBuf> = None;
    let mut explain = false;
    let mut color = color;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "--explain" => explain = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_once(&mut input, value, "--input")?;
            }
            "--base-dir" | "-C" => {
                let value = args.next().ok_or_else(|| "error: --base-dir expects a value".to_string())?;
                set_once(&mut base_dir, value, "--base-dir")?;
            }
            _ if arg.starts_with("--input=") => {
                set_once(&mut input, arg.trim_start_matches("--input=").to_string(), "--input")?;
            }
            _ if arg.starts_with("--base-dir=") => {
                set_once(&mut base_dir, arg.trim_start_matches("--base-dir=").to_string(), "--base-dir")?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
            _ => {
                return Err(format!("error: unexpected argument '{arg}' (the config is read from stdin or --input)"));
            }
        }
    }

    if let Some(dir) = &base_dir {
        if !dir.is_dir() {
            return Err(format!("error: --base-dir '{}' is not a directory", dir.display()));
        }
    }

    Ok(CliAction::Run(CliConfig { input, base_dir, explain, color }))
}

fn set_once(slot: &mut Option<PathBuf>, value: String, flag: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("error: {flag} expects a value"));
    }
    if slot.is_some() {
        return Err(format!("error: {flag} provided multiple times"));
    }
    *slot = Some(PathBuf::from(value));
    Ok(())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "sevenize {version}

Converts a v6 decoder config into the v7 format.

Usage:
  sevenize [OPTIONS] < joshua-v6.config > joshua.conf
  sevenize [OPTIONS] --input joshua-v6.config > joshua.conf

Options:
  -i, --input <file>         Read the v6 config from <file> instead of stdin.
  -C, --base-dir <dir>       Resolve relative grammar paths against <dir> when
                             checking for packed grammars. Default: current
                             directory.
  --explain                  Print a per-line migration report on stderr.
  --color                    Force ANSI color in the report.
  --no-color                 Disable ANSI color in the report.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}               Log filter, e.g. debug (default: warn).

Moses phrase tables must be converted first with {converter}
and declared with type 'phrase'.

Exit codes:
  0  Success.
  1  Migration failed (unsupported grammar, malformed line, I/O error).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
        converter = sevenize::PHRASE_TABLE_CONVERTER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    fn config(list: &[&str]) -> CliConfig {
        match parse_args(args(list), false) {
            Ok(CliAction::Run(config)) => config,
            other => panic!("expected a run config for {list:?}, got {other:?}"),
        }
    }

    #[test]
    fn defaults_read_stdin() {
        assert_eq!(config(&[]), CliConfig { input: None, base_dir: None, explain: false, color: false });
        assert_eq!(config(&[]).source_label(), "<stdin>");
        assert!(matches!(parse_args(args(&[]), true), Ok(CliAction::Run(CliConfig { color: true, .. }))));
    }

    #[test]
    fn flags_and_values() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().to_str().unwrap();

        let separate = config(&["--explain", "--color", "-i", "v6.config", "-C", dir]);
        let joined = config(&["--input=v6.config", &format!("--base-dir={dir}"), "--explain", "--color"]);
        assert_eq!(separate, joined);
        assert_eq!(separate.input, Some(PathBuf::from("v6.config")));
        assert_eq!(separate.base_dir, Some(root.path().to_path_buf()));
        assert!(separate.explain && separate.color);

        assert!(!config(&["--color", "--no-color"]).color);
    }

    #[test]
    fn help_and_version_stop_parsing() {
        assert_eq!(parse_args(args(&["--explain", "-h", "--bogus"]), false), Ok(CliAction::Help));
        assert_eq!(parse_args(args(&["--version"]), false), Ok(CliAction::Version));
        assert_eq!(parse_args(args(&["-V"]), false), Ok(CliAction::Version));
    }

    #[test]
    fn rejects_bad_arguments() {
        let cases = [
            (&["--input"][..], "--input expects a value"),
            (&["--input="][..], "--input expects a value"),
            (&["-C"][..], "--base-dir expects a value"),
            (&["-i", "a", "--input=b"][..], "--input provided multiple times"),
            (&["--frobnicate"][..], "unknown option '--frobnicate'"),
            (&["v6.config"][..], "unexpected argument 'v6.config'"),
            (&["--base-dir", "/nonexistent/sevenize-base"][..], "is not a directory"),
        ];

        for (list, expected) in cases {
            let err = parse_args(args(list), false).unwrap_err();
            assert!(err.contains(expected), "args {list:?}: {err}");
            assert_eq!(Failure::Usage(err).exit_code(), 2, "args {list:?}");
        }
    }

    #[test]
    fn successful_run_from_file() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("v6.config");
        std::fs::write(&input, "maxspan = 20\npt_0 -1\n").unwrap();

        let config = config(&["--input", input.to_str().unwrap()]);
        let mut out = Vec::new();
        let metrics = run(&config, &mut out).unwrap();

        assert_eq!(metrics.lines, 2);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("span_limit = 20\n"));
        assert!(out.ends_with("weights = {\n  pt_0 = -1\n}\n"));
    }

    #[test]
    fn migration_failures_exit_with_one() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("v6.config");
        std::fs::write(&input, "top-n = 0\ntm = moses pt 12 phrase-table.gz\n").unwrap();

        let config = config(&["-i", input.to_str().unwrap()]);
        let mut out = Vec::new();
        let failure = Failure::Migration(run(&config, &mut out).unwrap_err());

        assert_eq!(failure.exit_code(), 1);
        let message = failure.message();
        assert!(message.starts_with("error: line 2: "), "{message}");
        assert!(message.contains(sevenize::PHRASE_TABLE_CONVERTER), "{message}");
        assert_eq!(String::from_utf8(out).unwrap(), "top_n = 0\n");

        std::fs::write(&input, "tm = thrax pt 12\n").unwrap();
        let failure = Failure::Migration(run(&config, &mut Vec::new()).unwrap_err());
        assert_eq!(failure.exit_code(), 1);
        assert!(failure.message().contains("line 1"));

        let missing = config_for_missing(root.path());
        let failure = Failure::Migration(run(&missing, &mut Vec::new()).unwrap_err());
        assert_eq!(failure.exit_code(), 1);
        assert!(failure.message().contains("failed to open input"));
    }

    fn config_for_missing(dir: &std::path::Path) -> CliConfig {
        CliConfig { input: Some(dir.join("missing.config")), base_dir: None, explain: false, color: false }
    }
}
