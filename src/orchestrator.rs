//! Orchestrator for coordinating the changelog workflow
//!
//! This module provides:
//! - Workflow coordination: open repository → read latest commit → analyze manifests → write
//! - Configuration loading with CLI overrides
//! - Content source selection (commit blobs or working tree)
//! - Error handling with per-manifest continuation

use crate::cli::CliArgs;
use crate::config::Config;
use crate::domain::{CommitDependencyDiff, CommitInfo};
use crate::driver::{DiffDriver, FileFailure};
use crate::error::{AppError, IoError};
use crate::git::{CommitPatches, DiffProvider, GitDiffProvider};
use crate::output::MarkdownFormatter;
use crate::progress::{Progress, Stage};
use crate::source::{
    CommitContentSource, ContentSourceKind, FileContentSource, WorkdirContentSource,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Orchestrator for coordinating the changelog workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Configuration after CLI overrides
    config: Config,
    /// Repository working tree root
    root: PathBuf,
    /// Supplier of the latest commit
    provider: Box<dyn DiffProvider>,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// Commit that was analyzed
    pub commit: CommitInfo,
    /// Per-manifest dependency changes
    pub diff: CommitDependencyDiff,
    /// Manifests that could not be analyzed
    pub errors: Vec<OrchestratorError>,
}

/// Errors that can occur for a single manifest during orchestration
#[derive(Debug)]
pub enum OrchestratorError {
    /// Manifest was skipped because analyzing it failed
    FileFailed { path: String, message: String },
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::FileFailed { path, message } => write!(f, "{}: {}", path, message),
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl From<FileFailure> for OrchestratorError {
    fn from(failure: FileFailure) -> Self {
        OrchestratorError::FileFailed {
            path: failure.path,
            message: failure.error.to_string(),
        }
    }
}

impl Orchestrator {
    /// Open the repository at the CLI path and load its configuration
    pub fn new(args: CliArgs) -> Result<Self, AppError> {
        let provider = GitDiffProvider::discover(&args.path)?;
        let root = provider.workdir().unwrap_or_else(|| args.path.clone());
        let config = Self::load_config(&args, &root)?;
        debug!(root = %root.display(), ?config, "loaded configuration");
        Ok(Self::with_provider(args, config, root, Box::new(provider)))
    }

    /// Create an orchestrator with a custom diff provider (for testing)
    pub fn with_provider(
        args: CliArgs,
        config: Config,
        root: PathBuf,
        provider: Box<dyn DiffProvider>,
    ) -> Self {
        Self {
            args,
            config,
            root,
            provider,
        }
    }

    /// Read `--config` if given, otherwise `depdiff.toml` under `root`, then apply flags
    pub fn load_config(args: &CliArgs, root: &Path) -> Result<Config, AppError> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::from_dir(root)?,
        };
        args.apply_to(&mut config);
        Ok(config)
    }

    /// Effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Where the changelog is written
    pub fn changelog_path(&self) -> PathBuf {
        self.config.output_path(&self.root)
    }

    /// Run the analysis workflow
    pub async fn run(&self) -> Result<OrchestratorResult, AppError> {
        self.run_with_progress(!self.args.quiet).await
    }

    /// Run the analysis workflow with optional progress display
    pub async fn run_with_progress(
        &self,
        show_progress: bool,
    ) -> Result<OrchestratorResult, AppError> {
        let mut progress = Progress::new(show_progress);

        // Step 1: Read the latest commit and its patches
        progress.enter(Stage::ReadingCommit);
        let latest = self.provider.latest_commit();
        progress.clear();
        let CommitPatches { commit, patches } = latest?;
        info!(commit = %commit.short_id, files = patches.len(), "read latest commit");

        // Step 2: Analyze every manifest the commit touched
        progress.enter(Stage::AnalyzingManifests);
        let source: Box<dyn FileContentSource> = match self.config.content_source {
            ContentSourceKind::Commit => Box::new(CommitContentSource::from_patches(&patches)),
            ContentSourceKind::Workdir => Box::new(WorkdirContentSource::new(&self.root)),
        };
        let driver = DiffDriver::new(&self.config, source.as_ref());
        let analysis = driver.analyze_commit(&patches).await;
        progress.clear();

        info!(
            manifests = analysis.diff.files.len(),
            changes = analysis.diff.total_changes(),
            failed = analysis.failures.len(),
            "analyzed commit"
        );

        Ok(OrchestratorResult {
            commit,
            diff: analysis.diff,
            errors: analysis.failures.into_iter().map(Into::into).collect(),
        })
    }

    /// Render the markdown changelog and write it to the configured path
    pub fn write_changelog(&self, result: &OrchestratorResult) -> Result<PathBuf, AppError> {
        let path = self.changelog_path();
        let content = MarkdownFormatter::new().render(result);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| IoError::write_error(parent, e))?;
            }
        }
        std::fs::write(&path, content).map_err(|e| IoError::write_error(&path, e))?;

        info!(path = %path.display(), "wrote changelog");
        Ok(path)
    }
}
