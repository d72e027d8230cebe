//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Commit header with id, author and summary
//! - Per-manifest change listing grouped by dependency block
//! - Aligned `+` / `-` / `~` markers per change kind
//! - Summary line with change and failure counts

use crate::domain::{
    ChangeKind, CommitDependencyDiff, CommitInfo, DependencyBlock, DependencyChange,
    FileDiffResult,
};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn marker(kind: ChangeKind) -> &'static str {
        match kind {
            ChangeKind::Added => "+",
            ChangeKind::Removed => "-",
            ChangeKind::Updated => "~",
        }
    }

    /// Calculate the maximum dependency name length for alignment
    fn max_name_length(file: &FileDiffResult) -> usize {
        DependencyBlock::all()
            .iter()
            .filter_map(|b| file.block(*b))
            .flat_map(|diff| diff.iter())
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
    }

    fn format_commit(&self, commit: &CommitInfo, writer: &mut dyn Write) -> std::io::Result<()> {
        let date = commit.time.format("%Y/%m/%d %H:%M");
        if self.color {
            writeln!(
                writer,
                "{} {} {}",
                commit.short_id.yellow(),
                commit.summary.bold(),
                format!("({}, {})", commit.author, date).dimmed()
            )?;
        } else {
            writeln!(
                writer,
                "{} {} ({}, {})",
                commit.short_id, commit.summary, commit.author, date
            )?;
        }
        writeln!(writer)
    }

    /// Format a single change line
    fn format_change_line(
        &self,
        change: &DependencyChange,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let marker = Self::marker(change.kind);

        if self.color {
            let name_display = format!("{:width$}", change.name, width = max_name_len);
            let marker_display = match change.kind {
                ChangeKind::Added => marker.green(),
                ChangeKind::Removed => marker.red(),
                ChangeKind::Updated => marker.yellow(),
            };
            match &change.previous_version {
                Some(prev) => writeln!(
                    writer,
                    "    {} {} {} {} {}",
                    marker_display,
                    name_display,
                    prev.dimmed(),
                    "→".dimmed(),
                    change.version.bright_white().bold()
                ),
                None => writeln!(
                    writer,
                    "    {} {} {}",
                    marker_display, name_display, change.version
                ),
            }
        } else {
            match &change.previous_version {
                Some(prev) => writeln!(
                    writer,
                    "    {} {:width$} {} -> {}",
                    marker,
                    change.name,
                    prev,
                    change.version,
                    width = max_name_len
                ),
                None => writeln!(
                    writer,
                    "    {} {:width$} {}",
                    marker,
                    change.name,
                    change.version,
                    width = max_name_len
                ),
            }
        }
    }

    fn format_summary(
        &self,
        diff: &CommitDependencyDiff,
        failures: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let changes = diff.total_changes();
        let manifests = diff.files.len();

        if changes == 0 && failures == 0 {
            if self.color {
                writeln!(writer, "{}", "No dependencies changed".dimmed())?;
            } else {
                writeln!(writer, "No dependencies changed")?;
            }
            return Ok(());
        }

        if self.color {
            write!(
                writer,
                "{} change(s) in {} manifest(s)",
                changes.to_string().green(),
                manifests
            )?;
            if failures > 0 {
                write!(writer, ", {} failed", failures.to_string().red())?;
            }
        } else {
            write!(writer, "{} change(s) in {} manifest(s)", changes, manifests)?;
            if failures > 0 {
                write!(writer, ", {} failed", failures)?;
            }
        }
        writeln!(writer)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(&result.diff, result.errors.len(), writer);
        }

        self.format_commit(&result.commit, writer)?;

        for file in &result.diff.files {
            self.format_file(file, writer)?;
        }

        if !result.errors.is_empty() {
            if self.color {
                writeln!(writer, "{}:", "Errors".red().bold())?;
            } else {
                writeln!(writer, "Errors:")?;
            }
            for error in &result.errors {
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), error)?;
                } else {
                    writeln!(writer, "  - {}", error)?;
                }
            }
            writeln!(writer)?;
        }

        self.format_summary(&result.diff, result.errors.len(), writer)
    }

    fn format_file(&self, file: &FileDiffResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // Manifests touched without a net change only show up in verbose mode
        if !file.has_changes() {
            if self.verbosity == Verbosity::Verbose {
                if self.color {
                    writeln!(writer, "{} {}", file.path.bold(), "(no net change)".dimmed())?;
                } else {
                    writeln!(writer, "{} (no net change)", file.path)?;
                }
                writeln!(writer)?;
            }
            return Ok(());
        }

        let count = file.change_count();
        if self.color {
            writeln!(
                writer,
                "{} — {} {}",
                file.path.bold(),
                count.to_string().green(),
                if count == 1 { "change" } else { "changes" }
            )?;
        } else {
            writeln!(writer, "{} — {} changes", file.path, count)?;
        }

        let max_name_len = Self::max_name_length(file);
        for block in DependencyBlock::all() {
            let Some(diff) = file.block(*block) else {
                continue;
            };
            if self.color {
                writeln!(writer, "  {}", block.display_name().cyan())?;
            } else {
                writeln!(writer, "  {}", block.display_name())?;
            }
            for change in diff.iter() {
                self.format_change_line(change, max_name_len, writer)?;
            }
        }

        writeln!(writer)
    }
}
