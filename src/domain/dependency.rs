//! Dependency change records

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a dependency changed across a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Declaration disappeared
    Removed,
    /// Declaration appeared
    Added,
    /// Declaration kept its name but changed its version
    Updated,
}

impl ChangeKind {
    /// Returns the section label used in rendered output
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Removed => "Removed",
            ChangeKind::Added => "Added",
            ChangeKind::Updated => "Updated",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classified change of a single dependency
///
/// For `Added` the version is the new value; for `Removed` it is the value that
/// disappeared; for `Updated` it is the new value and `previous_version` holds the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyChange {
    /// Dependency name
    pub name: String,
    /// Current version (see type docs for meaning per kind)
    pub version: String,
    /// Kind of change
    pub kind: ChangeKind,
    /// Version before the update, only for `Updated`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<String>,
}

impl DependencyChange {
    /// Creates an `Added` record
    pub fn added(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind: ChangeKind::Added,
            previous_version: None,
        }
    }

    /// Creates a `Removed` record
    pub fn removed(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind: ChangeKind::Removed,
            previous_version: None,
        }
    }

    /// Creates an `Updated` record
    pub fn updated(
        name: impl Into<String>,
        previous_version: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind: ChangeKind::Updated,
            previous_version: Some(previous_version.into()),
        }
    }

    /// Turns this record into an update from `previous` to the current version
    pub(crate) fn mark_updated(&mut self, previous: impl Into<String>, version: impl Into<String>) {
        self.kind = ChangeKind::Updated;
        self.previous_version = Some(previous.into());
        self.version = version.into();
    }
}

impl fmt::Display for DependencyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.previous_version {
            Some(prev) => write!(f, "{}: {} → {}", self.name, prev, self.version),
            None => write!(f, "{}: {}", self.name, self.version),
        }
    }
}
