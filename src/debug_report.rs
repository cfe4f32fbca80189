use sevenize::{LineCategory, RunMetrics, TraceEntry};

mod ansi {
    /// SGR codes used by the report.
    #[derive(Debug, Clone, Copy)]
    pub enum Style {
        Bold,
        Dim,
        Green,
        Yellow,
        Blue,
        Magenta,
        Cyan,
        Gray,
    }

    impl Style {
        fn code(self) -> &'static str {
            match self {
                Style::Bold => "1",
                Style::Dim => "2",
                Style::Green => "32",
                Style::Yellow => "33",
                Style::Blue => "34",
                Style::Magenta => "35",
                Style::Cyan => "36",
                Style::Gray => "90",
            }
        }
    }

    /// Wraps text in escape sequences only when color is on.
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, text: impl AsRef<str>, styles: &[Style]) -> String {
            let text = text.as_ref();
            if !self.enabled || styles.is_empty() {
                return text.to_string();
            }
            let codes: Vec<&str> = styles.iter().map(|s| s.code()).collect();
            format!("\x1b[{}m{text}\x1b[0m", codes.join(";"))
        }
    }
}

use ansi::{Palette, Style};

/// Print the `--explain` report to stderr; stdout carries the migrated config.
pub fn print_run(source: &str, metrics: &RunMetrics, color: bool) {
    let palette = Palette::new(color);
    eprintln!("\n{}", palette.paint(format!("⚙  Migrating: {source}"), &[Style::Bold, Style::Cyan]));

    eprintln!("\n{}", palette.paint("━━━ Lines ━━━", &[Style::Gray]));
    if metrics.trace.is_empty() {
        eprintln!("{}", palette.paint("  No configuration lines", &[Style::Dim]));
    } else {
        for entry in &metrics.trace {
            eprintln!("  {}", fmt_entry(entry, &palette));
        }
    }

    eprintln!("\n{}", palette.paint("━━━ Summary ━━━", &[Style::Gray]));
    let counts = &metrics.counts;
    eprintln!(
        "  Options: {}  │  Grammars: {}  │  Feature functions: {} ({} lm)",
        palette.paint(counts.scalars.to_string(), &[Style::Green]),
        palette.paint(counts.grammars.to_string(), &[Style::Green]),
        palette.paint((counts.feature_functions + counts.language_models).to_string(), &[Style::Green]),
        counts.language_models,
    );
    eprintln!(
        "  Weights: {}  {}  │  Skipped: {}",
        palette.paint(counts.weights.to_string(), &[Style::Green]),
        if counts.weight_overrides > 0 {
            palette.paint(format!("({} overridden)", counts.weight_overrides), &[Style::Yellow])
        } else {
            palette.paint("(no overrides)", &[Style::Dim])
        },
        palette.paint(counts.skipped.to_string(), &[Style::Dim]),
    );

    eprintln!("\n{}", palette.paint("━━━ Timing ━━━", &[Style::Gray]));
    eprintln!(
        "  Total: {}  │  Lines read: {}",
        palette.paint(format!("{:?}", metrics.total), &[Style::Green]),
        palette.paint(metrics.lines.to_string(), &[Style::Dim]),
    );
    eprintln!();
}

fn fmt_entry(entry: &TraceEntry, palette: &Palette) -> String {
    let color = match entry.category {
        LineCategory::Scalar => Style::Blue,
        LineCategory::Weight => Style::Yellow,
        LineCategory::Grammar => Style::Green,
        LineCategory::LanguageModel => Style::Magenta,
        LineCategory::FeatureFunction => Style::Cyan,
    };
    format!(
        "{} {} {}",
        palette.paint(format!("{:>4}", entry.line), &[Style::Gray]),
        palette.paint(format!("{:<8}", entry.category.to_string()), &[color]),
        entry.summary,
    )
}
