//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with locating dependency blocks in a manifest
//! - ReconcileError: Diff lines that are not a single `name: version` declaration
//! - GitError: Issues reading the latest commit from the repository
//! - ConfigError: Issues with the configuration file or CLI options
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Diff line reconciliation errors
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Repository related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to reading manifest content and locating fields in it
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The field marker never appeared, or was never followed by a closing brace
    #[error("field {marker} not found in {path}")]
    FieldNotFound { path: String, marker: String },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The commit carries no post-patch content for this path
    #[error("no committed content for {path}")]
    NotInCommit { path: String },
}

/// Errors raised while folding diff lines into change records
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Line does not split into exactly a name and a version
    #[error("malformed dependency line: '{line}'")]
    MalformedDiffLine { line: String },
}

/// Errors related to reading the latest commit
#[derive(Error, Debug)]
pub enum GitError {
    /// Repository could not be opened
    #[error("failed to open repository at {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// HEAD does not point at a commit
    #[error("repository has no commit at HEAD: {message}")]
    NoHead { message: String },

    /// Diffing the commit against its parent failed
    #[error("failed to diff commit {commit}: {message}")]
    Diff { commit: String, message: String },

    /// Post-patch blob could not be loaded
    #[error("failed to load blob for {path}: {message}")]
    Blob { path: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected schema
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Unknown content source name
    #[error("invalid content source '{value}': expected 'commit' or 'workdir'")]
    InvalidSource { value: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Changelog could not be written
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new FieldNotFound error
    pub fn field_not_found(path: impl Into<String>, marker: impl Into<String>) -> Self {
        ManifestError::FieldNotFound {
            path: path.into(),
            marker: marker.into(),
        }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this is a missing field rather than a read failure
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, ManifestError::FieldNotFound { .. })
    }
}

impl ReconcileError {
    /// Creates a new MalformedDiffLine error
    pub fn malformed(line: impl Into<String>) -> Self {
        ReconcileError::MalformedDiffLine { line: line.into() }
    }
}

impl GitError {
    /// Creates a new Open error
    pub fn open(path: impl Into<PathBuf>, err: &git2::Error) -> Self {
        GitError::Open {
            path: path.into(),
            message: err.message().to_string(),
        }
    }

    /// Creates a new NoHead error
    pub fn no_head(err: &git2::Error) -> Self {
        GitError::NoHead {
            message: err.message().to_string(),
        }
    }

    /// Creates a new Diff error
    pub fn diff(commit: impl Into<String>, err: &git2::Error) -> Self {
        GitError::Diff {
            commit: commit.into(),
            message: err.message().to_string(),
        }
    }
}

impl IoError {
    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::WriteError {
            path: path.into(),
            source,
        }
    }
}
