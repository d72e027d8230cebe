//! Line-level patch model handed over by a diff provider

use crate::domain::CommitInfo;

/// Origin tag of a diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrigin {
    /// Unchanged line shown for context
    Context,
    /// Line present only after the patch
    Added,
    /// Line present only before the patch
    Removed,
}

impl LineOrigin {
    /// Maps a unified-diff origin character; end-of-file markers have no mapping
    pub fn from_char(origin: char) -> Option<Self> {
        match origin {
            ' ' => Some(LineOrigin::Context),
            '+' => Some(LineOrigin::Added),
            '-' => Some(LineOrigin::Removed),
            _ => None,
        }
    }

    /// Returns true if the line has a post-patch line number
    pub fn consumes_new_line(&self) -> bool {
        !matches!(self, LineOrigin::Removed)
    }
}

/// One tagged line of a hunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub origin: LineOrigin,
    /// Raw text without the trailing line terminator
    pub content: String,
}

impl DiffLine {
    pub fn new(origin: LineOrigin, content: impl Into<String>) -> Self {
        Self {
            origin,
            content: content.into(),
        }
    }

    pub fn context(content: impl Into<String>) -> Self {
        Self::new(LineOrigin::Context, content)
    }

    pub fn added(content: impl Into<String>) -> Self {
        Self::new(LineOrigin::Added, content)
    }

    pub fn removed(content: impl Into<String>) -> Self {
        Self::new(LineOrigin::Removed, content)
    }
}

/// Contiguous block of changed lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// First post-patch line number covered by the hunk
    pub new_start: u32,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    pub fn new(new_start: u32, lines: Vec<DiffLine>) -> Self {
        Self { new_start, lines }
    }
}

/// All hunks of one changed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    /// Post-patch path, relative to the repository root
    pub path: String,
    pub hunks: Vec<Hunk>,
    /// Post-patch file content, when the provider has it
    pub new_content: Option<String>,
}

impl FilePatch {
    pub fn new(path: impl Into<String>, hunks: Vec<Hunk>) -> Self {
        Self {
            path: path.into(),
            hunks,
            new_content: None,
        }
    }

    /// Attaches the post-patch content (builder pattern)
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.new_content = Some(content.into());
        self
    }

    /// Returns the final path segment
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Latest commit and the patches it introduced
#[derive(Debug, Clone)]
pub struct CommitPatches {
    pub commit: CommitInfo,
    pub patches: Vec<FilePatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_from_char() {
        assert_eq!(LineOrigin::from_char(' '), Some(LineOrigin::Context));
        assert_eq!(LineOrigin::from_char('+'), Some(LineOrigin::Added));
        assert_eq!(LineOrigin::from_char('-'), Some(LineOrigin::Removed));
        assert_eq!(LineOrigin::from_char('>'), None);
        assert_eq!(LineOrigin::from_char('='), None);
    }

    #[test]
    fn test_removed_does_not_consume_new_line() {
        assert!(LineOrigin::Context.consumes_new_line());
        assert!(LineOrigin::Added.consumes_new_line());
        assert!(!LineOrigin::Removed.consumes_new_line());
    }

    #[test]
    fn test_file_name_is_last_segment() {
        assert_eq!(FilePatch::new("apps/web/package.json", vec![]).file_name(), "package.json");
        assert_eq!(FilePatch::new("package.json", vec![]).file_name(), "package.json");
        assert_eq!(
            FilePatch::new("package.json.bak", vec![]).file_name(),
            "package.json.bak"
        );
    }
}
