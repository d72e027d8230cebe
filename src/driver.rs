//! Diff driver
//!
//! Walks every hunk of every manifest patch, tracks the post-patch line number
//! of each line and hands declaration lines that fall inside a dependency
//! block to the reconciler.
//!
//! Line numbering: the counter starts at `new_start - 1`; added and context
//! lines advance it before being looked at, removed lines do not (they have
//! no post-patch line). A removed line is therefore attributed to the line
//! number of the last surviving line above it.

use crate::bounds::locate_field_in;
use crate::config::Config;
use crate::domain::{
    ChangeMapping, CommitDependencyDiff, DependencyBlock, FieldBounds, FileDiffResult,
};
use crate::error::{AppError, ReconcileError};
use crate::finalize::finalize;
use crate::git::{FilePatch, Hunk, LineOrigin};
use crate::reconcile::apply_line;
use crate::source::FileContentSource;
use tracing::{debug, warn};

/// Where lines of one dependency block are routed
#[derive(Debug, Clone, Copy)]
pub struct BlockRoute<'a> {
    pub block: DependencyBlock,
    /// `None` if the block was not found in the manifest
    pub bounds: Option<FieldBounds>,
    pub marker: &'a str,
}

impl BlockRoute<'_> {
    /// Returns true if a line at `line_num` with `content` belongs to this block
    fn accepts(&self, line_num: u32, content: &str) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        let trimmed = content.trim();
        bounds.contains(line_num)
            && !trimmed.is_empty()
            && !trimmed.contains(self.marker)
            && !is_closing_brace(trimmed)
    }
}

fn is_closing_brace(trimmed: &str) -> bool {
    trimmed.trim_end_matches(',') == "}"
}

/// Fold the hunks of one file into one mapping per route, in route order
///
/// A line is given to the first route that accepts it.
pub fn fold_hunks(
    hunks: &[Hunk],
    routes: &[BlockRoute<'_>],
) -> Result<Vec<ChangeMapping>, ReconcileError> {
    let mut mappings = vec![ChangeMapping::new(); routes.len()];

    for hunk in hunks {
        let mut line_num = hunk.new_start.saturating_sub(1);

        for line in &hunk.lines {
            if line.origin.consumes_new_line() {
                line_num += 1;
            }
            if line.origin == LineOrigin::Context {
                continue;
            }

            if let Some(idx) = routes
                .iter()
                .position(|route| route.accepts(line_num, &line.content))
            {
                apply_line(&mut mappings[idx], line)?;
            }
        }
    }

    Ok(mappings)
}

/// A manifest that could not be analyzed
#[derive(Debug)]
pub struct FileFailure {
    pub path: String,
    pub error: AppError,
}

/// Result of analyzing every manifest in a commit
#[derive(Debug, Default)]
pub struct CommitAnalysis {
    pub diff: CommitDependencyDiff,
    /// Manifests skipped because of an error
    pub failures: Vec<FileFailure>,
}

/// Drives locating, reconciling and finalizing for manifest patches
pub struct DiffDriver<'a> {
    config: &'a Config,
    source: &'a dyn FileContentSource,
}

impl<'a> DiffDriver<'a> {
    pub fn new(config: &'a Config, source: &'a dyn FileContentSource) -> Self {
        Self { config, source }
    }

    /// Returns true if the patch touches the tracked manifest
    pub fn is_manifest(&self, patch: &FilePatch) -> bool {
        self.config.is_manifest(patch.file_name())
    }

    /// Locate a block, treating a missing marker as an absent block
    async fn locate(
        &self,
        path: &str,
        block: DependencyBlock,
    ) -> Result<Option<FieldBounds>, AppError> {
        let marker = self.config.markers.for_block(block);
        match locate_field_in(self.source, path, marker).await {
            Ok(bounds) => {
                debug!(path, %block, start = bounds.start, end = bounds.end, "located block");
                Ok(Some(bounds))
            }
            Err(e) if e.is_field_not_found() => {
                warn!(path, %block, marker, "block not found, treating as unchanged");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Analyze a single manifest patch
    pub async fn analyze_file(&self, patch: &FilePatch) -> Result<FileDiffResult, AppError> {
        let mut routes = Vec::with_capacity(DependencyBlock::all().len());
        for block in DependencyBlock::all() {
            routes.push(BlockRoute {
                block: *block,
                bounds: self.locate(&patch.path, *block).await?,
                marker: self.config.markers.for_block(*block),
            });
        }

        let mappings = fold_hunks(&patch.hunks, &routes)?;

        let mut result = FileDiffResult::new(&patch.path);
        for (route, mapping) in routes.iter().zip(mappings) {
            result.set_block(route.block, finalize(mapping));
        }
        debug!(path = %patch.path, changes = result.change_count(), "analyzed manifest");
        Ok(result)
    }

    /// Analyze every manifest patch of a commit, isolating per-file failures
    pub async fn analyze_commit(&self, patches: &[FilePatch]) -> CommitAnalysis {
        let mut analysis = CommitAnalysis::default();

        for patch in patches.iter().filter(|p| self.is_manifest(p)) {
            match self.analyze_file(patch).await {
                Ok(result) => analysis.diff.add_file(result),
                Err(error) => {
                    warn!(path = %patch.path, %error, "skipping manifest");
                    analysis.failures.push(FileFailure {
                        path: patch.path.clone(),
                        error,
                    });
                }
            }
        }

        analysis
    }
}
