//! Core domain models for depdiff
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency change records and their kinds
//! - The per-block change mapping built while scanning hunks
//! - Field line ranges inside a manifest
//! - Per-file and per-commit diff results
//! - Commit metadata

mod commit;
mod dependency;
mod field;
mod mapping;
mod summary;

pub use commit::CommitInfo;
pub use dependency::{ChangeKind, DependencyChange};
pub use field::FieldBounds;
pub use mapping::ChangeMapping;
pub use summary::{CommitDependencyDiff, DependencyBlock, DependencyDiff, FileDiffResult};
