//! CLI argument parsing module for depdiff

use crate::config::Config;
use crate::source::ContentSourceKind;
use clap::Parser;
use std::path::PathBuf;

/// Dependency changelog generator for the latest commit
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depdiff",
    version,
    about = "Summarize dependency changes of the latest commit"
)]
pub struct CliArgs {
    /// Repository directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Configuration file (default: depdiff.toml in the repository root)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Manifest file name to track
    #[arg(long, value_name = "NAME")]
    pub manifest: Option<String>,

    /// Changelog file to write
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Where manifest content is read from (commit, workdir)
    #[arg(long, value_name = "SOURCE")]
    pub source: Option<ContentSourceKind>,

    // Output options
    /// Output results in JSON format
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Output a colored terminal summary
    #[arg(long)]
    pub text: bool,

    // General options
    /// Dry run mode - print the changelog without writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Apply flag overrides on top of a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(manifest) = &self.manifest {
            config.manifest = manifest.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(source) = self.source {
            config.content_source = source;
        }
    }
}
