//! Rendering of analyzed commits
//!
//! Three renderings share the [`OutputFormatter`] trait:
//! - `markdown`: the changelog document, also what `--dry-run` prints
//! - `text`: colored terminal summary (`--text`)
//! - `json`: machine-readable result (`--json`)

mod json;
mod markdown;
mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

use crate::cli::CliArgs;
use crate::domain::FileDiffResult;
use crate::orchestrator::OrchestratorResult;
use std::io::Write;

/// Which rendering goes to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Text,
    Json,
}

/// How much the run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    /// Adds unchanged manifests and full commit messages
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Verbosity::Quiet,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }
}

/// Resolved stdout behavior for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    /// Color escapes in text output; `colored` still honors NO_COLOR and tty checks
    pub color: bool,
    /// Changelog is printed instead of written
    pub dry_run: bool,
}

impl OutputConfig {
    pub fn from_cli(args: &CliArgs) -> Self {
        let format = match (args.json, args.text) {
            (true, _) => OutputFormat::Json,
            (false, true) => OutputFormat::Text,
            (false, false) => OutputFormat::Markdown,
        };

        Self {
            format,
            verbosity: Verbosity::from_flags(args.verbose, args.quiet),
            color: true,
            dry_run: args.dry_run,
        }
    }

    /// Whether a rendering of the result goes to stdout
    ///
    /// The markdown rendering is the changelog itself, so outside a dry run it
    /// only goes to the file.
    pub fn prints_report(&self) -> bool {
        self.dry_run || self.format != OutputFormat::Markdown
    }

    /// Whether to announce the path of the written changelog
    pub fn announces_changelog(&self) -> bool {
        !self.dry_run && self.format == OutputFormat::Markdown && self.verbosity != Verbosity::Quiet
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render the whole analyzed commit
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Render one manifest's result
    fn format_file(&self, file: &FileDiffResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Pick the formatter for the configured stdout rendering
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}
