//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the commit and its per-manifest diffs
//! - Failure messages for manifests that could not be analyzed

use crate::domain::{CommitInfo, FileDiffResult};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn commit_to_json<'a>(&self, commit: &'a CommitInfo) -> JsonCommit<'a> {
        JsonCommit {
            id: &commit.id,
            short_id: &commit.short_id,
            summary: &commit.summary,
            message: (self.verbosity == Verbosity::Verbose).then(|| commit.trimmed_message()),
            author: &commit.author,
            time: commit.time.to_rfc3339(),
        }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Commit being described
    commit: JsonCommit<'a>,
    /// Number of changes across all manifests
    total_changes: usize,
    /// Per-manifest results; a null block means no net change
    files: &'a [FileDiffResult],
    /// Manifests that could not be analyzed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// JSON representation of the commit
#[derive(Serialize)]
struct JsonCommit<'a> {
    id: &'a str,
    short_id: &'a str,
    summary: &'a str,
    /// Full message, only in verbose mode
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    author: &'a str,
    time: String,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            commit: self.commit_to_json(&result.commit),
            total_changes: result.diff.total_changes(),
            files: &result.diff.files,
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }

    fn format_file(&self, file: &FileDiffResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(file).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
