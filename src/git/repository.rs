//! git2-backed diff provider
//!
//! Reads `HEAD`, diffs it against its first parent (or the empty tree for a
//! root commit) and converts every non-deleted, non-binary delta into a
//! [`FilePatch`] carrying its post-patch blob.

use super::{CommitPatches, DiffLine, DiffProvider, FilePatch, Hunk, LineOrigin};
use crate::domain::CommitInfo;
use crate::error::GitError;
use chrono::{DateTime, Utc};
use git2::{Delta, Diff, DiffFlags, Patch, Repository};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Diff provider reading the latest commit of a local repository
pub struct GitDiffProvider {
    repo: Repository,
}

impl GitDiffProvider {
    /// Discover the repository containing `path`
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(|e| GitError::open(path, &e))?;
        Ok(Self { repo })
    }

    /// Working tree root, if the repository is not bare
    pub fn workdir(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }

    fn commit_info(commit: &git2::Commit<'_>) -> CommitInfo {
        let id = commit.id().to_string();
        let short_id = commit
            .as_object()
            .short_id()
            .ok()
            .and_then(|buf| buf.as_str().map(str::to_string))
            .unwrap_or_else(|| id.chars().take(7).collect());
        let time = DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0).unwrap_or_default();

        CommitInfo {
            id,
            short_id,
            summary: commit.summary().unwrap_or_default().to_string(),
            message: commit.message().unwrap_or_default().to_string(),
            author: commit.author().name().unwrap_or_default().to_string(),
            time,
        }
    }

    fn file_patch(
        &self,
        diff: &Diff<'_>,
        idx: usize,
        commit_id: &str,
    ) -> Result<Option<FilePatch>, GitError> {
        let Some(patch) = Patch::from_diff(diff, idx).map_err(|e| GitError::diff(commit_id, &e))?
        else {
            return Ok(None);
        };

        let delta = patch.delta();
        let new_file = delta.new_file();
        let path = match new_file.path() {
            Some(p) => p.to_string_lossy().replace('\\', "/"),
            None => return Ok(None),
        };

        if delta.status() == Delta::Deleted {
            debug!(path = %path, "skipping deleted file");
            return Ok(None);
        }
        if new_file.is_binary() || delta.flags().contains(DiffFlags::BINARY) {
            debug!(path = %path, "skipping binary file");
            return Ok(None);
        }

        let mut hunks = Vec::with_capacity(patch.num_hunks());
        for hunk_idx in 0..patch.num_hunks() {
            let (hunk, line_count) = patch
                .hunk(hunk_idx)
                .map_err(|e| GitError::diff(commit_id, &e))?;

            let mut lines = Vec::with_capacity(line_count);
            for line_idx in 0..line_count {
                let line = patch
                    .line_in_hunk(hunk_idx, line_idx)
                    .map_err(|e| GitError::diff(commit_id, &e))?;
                // end-of-file newline markers carry no line of their own
                let Some(origin) = LineOrigin::from_char(line.origin()) else {
                    continue;
                };
                let content = String::from_utf8_lossy(line.content());
                let content = content.trim_end_matches(['\n', '\r']);
                lines.push(DiffLine::new(origin, content));
            }
            hunks.push(Hunk::new(hunk.new_start(), lines));
        }

        let blob = self
            .repo
            .find_blob(new_file.id())
            .map_err(|e| GitError::Blob {
                path: path.clone(),
                message: e.message().to_string(),
            })?;
        let content = String::from_utf8_lossy(blob.content()).into_owned();

        Ok(Some(FilePatch::new(path, hunks).with_content(content)))
    }
}

impl DiffProvider for GitDiffProvider {
    fn latest_commit(&self) -> Result<CommitPatches, GitError> {
        let commit = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| GitError::no_head(&e))?;
        let info = Self::commit_info(&commit);
        debug!(commit = %info.short_id, summary = %info.summary, "resolved latest commit");

        let tree = commit.tree().map_err(|e| GitError::diff(&info.id, &e))?;
        let parent_tree = if commit.parent_count() > 0 {
            let parent = commit.parent(0).map_err(|e| GitError::diff(&info.id, &e))?;
            Some(parent.tree().map_err(|e| GitError::diff(&info.id, &e))?)
        } else {
            None
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .map_err(|e| GitError::diff(&info.id, &e))?;

        let mut patches = Vec::new();
        for idx in 0..diff.deltas().len() {
            if let Some(patch) = self.file_patch(&diff, idx, &info.id)? {
                patches.push(patch);
            }
        }
        debug!(files = patches.len(), "collected file patches");

        Ok(CommitPatches {
            commit: info,
            patches,
        })
    }
}
