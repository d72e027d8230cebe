//! Diff provider for the latest commit
//!
//! This module provides:
//! - The line-level patch model consumed by the diff driver
//! - A trait for anything that can supply the latest commit's patches
//! - A git2 implementation over a local repository

mod patch;
mod repository;

pub use patch::{CommitPatches, DiffLine, FilePatch, Hunk, LineOrigin};
pub use repository::GitDiffProvider;

use crate::error::GitError;

/// Trait for supplying the latest commit and its per-file patches
pub trait DiffProvider {
    /// Returns the latest commit with its patches, in diff order
    fn latest_commit(&self) -> Result<CommitPatches, GitError>;
}
