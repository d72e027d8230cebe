//! Markdown changelog formatter
//!
//! Layout: one `###` heading per manifest, one `####` heading per changed
//! block and blockquoted Added / Removed / Updated lists. Blocks without a
//! net change are left out. Manifests that could not be analyzed are listed
//! under "Skipped Manifests". Only a commit that touched no manifest at all
//! gets the single "No dependencies changed" line.

use crate::domain::{CommitInfo, DependencyBlock, DependencyChange, DependencyDiff, FileDiffResult};
use crate::orchestrator::{OrchestratorError, OrchestratorResult};
use crate::output::OutputFormatter;
use std::io::Write;

/// Markdown formatter for the changelog file
#[derive(Debug, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render the full changelog into a string
    pub fn render(&self, result: &OrchestratorResult) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.format(result, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn write_header(&self, commit: &CommitInfo, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "# Latest Commit: {}", commit.trimmed_message())?;
        writeln!(
            writer,
            "_{} by {} on {}_",
            commit.short_id,
            commit.author,
            commit.time.format("%Y-%m-%d %H:%M UTC")
        )?;
        writeln!(writer, "## Dependency Changes")
    }

    fn write_section(
        &self,
        header: &str,
        changes: &[DependencyChange],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        writeln!(writer, ">##### {}", header)?;
        for change in changes {
            match &change.previous_version {
                Some(prev) => writeln!(
                    writer,
                    ">* `{}: {}` => `{}`",
                    change.name, prev, change.version
                )?,
                None => writeln!(writer, ">* `{}: {}`", change.name, change.version)?,
            }
        }
        Ok(())
    }

    fn write_block(
        &self,
        block: DependencyBlock,
        diff: &DependencyDiff,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "#### {}", block.display_name())?;
        self.write_section("Added", &diff.added, writer)?;
        self.write_section("Removed", &diff.removed, writer)?;
        self.write_section("Updated", &diff.updated, writer)?;
        writeln!(writer)
    }

    fn write_skipped(
        &self,
        errors: &[OrchestratorError],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if errors.is_empty() {
            return Ok(());
        }
        writeln!(writer, "### Skipped Manifests")?;
        for error in errors {
            match error {
                OrchestratorError::FileFailed { path, message } => {
                    writeln!(writer, ">* `{}`: {}", path, message)?
                }
            }
        }
        Ok(())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        self.write_header(&result.commit, writer)?;

        if result.diff.is_empty() && result.errors.is_empty() {
            writeln!(writer, "#### No dependencies changed")?;
            return Ok(());
        }

        for file in &result.diff.files {
            self.format_file(file, writer)?;
        }
        self.write_skipped(&result.errors, writer)
    }

    fn format_file(&self, file: &FileDiffResult, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "### `{}`", file.path)?;
        for block in DependencyBlock::all() {
            if let Some(diff) = file.block(*block) {
                self.write_block(*block, diff, writer)?;
            }
        }
        Ok(())
    }
}
