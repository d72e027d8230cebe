//! Diff result summary types
//!
//! Provides structures for tracking dependency changes at block, file and commit levels.

use super::DependencyChange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency block of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyBlock {
    /// Runtime dependencies
    Dependencies,
    /// Development-only dependencies
    DevDependencies,
}

impl DependencyBlock {
    /// Returns the heading used in rendered output
    pub fn display_name(&self) -> &'static str {
        match self {
            DependencyBlock::Dependencies => "Dependencies",
            DependencyBlock::DevDependencies => "Dev Dependencies",
        }
    }

    /// Returns both blocks in rendering order
    pub fn all() -> &'static [DependencyBlock] {
        &[DependencyBlock::Dependencies, DependencyBlock::DevDependencies]
    }
}

impl fmt::Display for DependencyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Net changes of one dependency block, partitioned by kind
///
/// Each list keeps the order in which names were first seen in the diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDiff {
    /// Dependencies that disappeared
    pub removed: Vec<DependencyChange>,
    /// Dependencies that appeared
    pub added: Vec<DependencyChange>,
    /// Dependencies whose version changed
    pub updated: Vec<DependencyChange>,
}

impl DependencyDiff {
    /// Returns the total number of changes
    pub fn total(&self) -> usize {
        self.removed.len() + self.added.len() + self.updated.len()
    }

    /// Iterates all changes: removed, then added, then updated
    pub fn iter(&self) -> impl Iterator<Item = &DependencyChange> {
        self.removed
            .iter()
            .chain(self.added.iter())
            .chain(self.updated.iter())
    }
}

/// Dependency diff result for a single manifest file
///
/// A `None` block means no net change in that block, which renderers omit
/// entirely rather than print as empty lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiffResult {
    /// Post-patch path of the manifest
    pub path: String,
    /// Changes in the dependencies block
    pub dependencies: Option<DependencyDiff>,
    /// Changes in the devDependencies block
    pub dev_dependencies: Option<DependencyDiff>,
}

impl FileDiffResult {
    /// Creates a result with no changes in either block
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            dependencies: None,
            dev_dependencies: None,
        }
    }

    /// Returns the diff for the given block
    pub fn block(&self, block: DependencyBlock) -> Option<&DependencyDiff> {
        match block {
            DependencyBlock::Dependencies => self.dependencies.as_ref(),
            DependencyBlock::DevDependencies => self.dev_dependencies.as_ref(),
        }
    }

    /// Sets the diff for the given block
    pub fn set_block(&mut self, block: DependencyBlock, diff: Option<DependencyDiff>) {
        match block {
            DependencyBlock::Dependencies => self.dependencies = diff,
            DependencyBlock::DevDependencies => self.dev_dependencies = diff,
        }
    }

    /// Returns true if either block changed
    pub fn has_changes(&self) -> bool {
        self.dependencies.is_some() || self.dev_dependencies.is_some()
    }

    /// Returns the number of changes across both blocks
    pub fn change_count(&self) -> usize {
        DependencyBlock::all()
            .iter()
            .filter_map(|b| self.block(*b))
            .map(DependencyDiff::total)
            .sum()
    }
}

/// Commit-wide collection of per-manifest results, in diff order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDependencyDiff {
    /// Results for each manifest file touched by the commit
    pub files: Vec<FileDiffResult>,
}

impl CommitDependencyDiff {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file result
    pub fn add_file(&mut self, file: FileDiffResult) {
        self.files.push(file);
    }

    /// Returns the result for `path`
    pub fn get(&self, path: &str) -> Option<&FileDiffResult> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Returns true if the commit touched no manifest file
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the total number of changes across all files
    pub fn total_changes(&self) -> usize {
        self.files.iter().map(FileDiffResult::change_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_diff() -> DependencyDiff {
        DependencyDiff {
            removed: vec![DependencyChange::removed("left-pad", "1.3.0")],
            added: vec![DependencyChange::added("lodash", "4.0.0")],
            updated: vec![DependencyChange::updated("react", "17.0.0", "18.0.0")],
        }
    }

    #[test]
    fn test_block_display_names() {
        assert_eq!(DependencyBlock::Dependencies.display_name(), "Dependencies");
        assert_eq!(
            format!("{}", DependencyBlock::DevDependencies),
            "Dev Dependencies"
        );
    }

    #[test]
    fn test_dependency_diff_total_and_iter() {
        let diff = sample_diff();
        assert_eq!(diff.total(), 3);
        let names: Vec<_> = diff.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["left-pad", "lodash", "react"]);
    }

    #[test]
    fn test_file_result_blocks() {
        let mut file = FileDiffResult::new("package.json");
        assert!(!file.has_changes());
        assert_eq!(file.change_count(), 0);

        file.set_block(DependencyBlock::DevDependencies, Some(sample_diff()));
        assert!(file.has_changes());
        assert!(file.block(DependencyBlock::Dependencies).is_none());
        assert_eq!(file.change_count(), 3);
    }

    #[test]
    fn test_commit_diff_lookup() {
        let mut commit = CommitDependencyDiff::new();
        assert!(commit.is_empty());

        let mut file = FileDiffResult::new("web/package.json");
        file.set_block(DependencyBlock::Dependencies, Some(sample_diff()));
        commit.add_file(file);
        commit.add_file(FileDiffResult::new("package.json"));

        assert!(!commit.is_empty());
        assert_eq!(commit.total_changes(), 3);
        assert!(commit.get("web/package.json").unwrap().has_changes());
        assert!(!commit.get("package.json").unwrap().has_changes());
        assert!(commit.get("missing.json").is_none());
    }

    #[test]
    fn test_serde_none_block_is_null() {
        let file = FileDiffResult::new("package.json");
        let json = serde_json::to_value(&file).unwrap();
        assert!(json["dependencies"].is_null());
        assert!(json["dev_dependencies"].is_null());
    }
}
