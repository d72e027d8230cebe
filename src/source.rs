//! Post-patch file content sources
//!
//! The field bounds locator streams a manifest line by line from one of:
//! - the blob recorded in the commit (default)
//! - the file checked out in the working tree

use crate::error::{ConfigError, ManifestError};
use crate::git::FilePatch;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, BufReader};

/// Line-oriented reader over a file's post-patch content
pub type ContentReader = Box<dyn AsyncBufRead + Unpin + Send>;

/// Trait for opening a file's post-patch content
#[async_trait]
pub trait FileContentSource: Send + Sync {
    /// Open `path` (relative to the repository root) for reading
    async fn open(&self, path: &str) -> Result<ContentReader, ManifestError>;
}

/// Which content source to read manifests from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ContentSourceKind {
    /// Blobs recorded in the commit
    #[default]
    Commit,
    /// Files in the working tree
    Workdir,
}

impl FromStr for ContentSourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commit" => Ok(ContentSourceKind::Commit),
            "workdir" | "worktree" => Ok(ContentSourceKind::Workdir),
            _ => Err(ConfigError::InvalidSource {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ContentSourceKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ContentSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSourceKind::Commit => write!(f, "commit"),
            ContentSourceKind::Workdir => write!(f, "workdir"),
        }
    }
}

/// Serves content snapshots taken from the commit's patches
#[derive(Debug, Clone, Default)]
pub struct CommitContentSource {
    files: HashMap<String, String>,
}

impl CommitContentSource {
    /// Collect the post-patch content of every patch that carries one
    pub fn from_patches(patches: &[FilePatch]) -> Self {
        let files = patches
            .iter()
            .filter_map(|p| p.new_content.clone().map(|c| (p.path.clone(), c)))
            .collect();
        Self { files }
    }

    /// Add or replace a snapshot
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

#[async_trait]
impl FileContentSource for CommitContentSource {
    async fn open(&self, path: &str) -> Result<ContentReader, ManifestError> {
        let content = self
            .files
            .get(path)
            .ok_or_else(|| ManifestError::NotInCommit {
                path: path.to_string(),
            })?;
        Ok(Box::new(Cursor::new(content.clone().into_bytes())))
    }
}

/// Streams files from the working tree
#[derive(Debug, Clone)]
pub struct WorkdirContentSource {
    root: PathBuf,
}

impl WorkdirContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileContentSource for WorkdirContentSource {
    async fn open(&self, path: &str) -> Result<ContentReader, ManifestError> {
        let full = self.root.join(path);
        let file = tokio::fs::File::open(&full)
            .await
            .map_err(|e| ManifestError::read_error(&full, e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}
