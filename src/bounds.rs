//! Field bounds locator
//!
//! Finds the line range a named JSON field's object value occupies in a manifest.
//!
//! Matching is by substring: the first line containing the marker opens the
//! field, and the first line from there on containing `}` closes it. Nested
//! objects inside the value are not tracked, and a marker that is a prefix of
//! another key will match that key too. Pick markers accordingly (the default
//! `"dependencies` cannot match `"devDependencies"` because of the quote).

use crate::domain::FieldBounds;
use crate::error::ManifestError;
use crate::source::FileContentSource;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Incremental scanner fed one line at a time
#[derive(Debug, Clone)]
pub struct BoundsScanner<'a> {
    marker: &'a str,
    line_num: u32,
    start: Option<u32>,
}

impl<'a> BoundsScanner<'a> {
    pub fn new(marker: &'a str) -> Self {
        Self {
            marker,
            line_num: 0,
            start: None,
        }
    }

    /// Consume the next line; returns the bounds once the closing line is seen
    pub fn feed(&mut self, line: &str) -> Option<FieldBounds> {
        self.line_num += 1;
        if line.contains(self.marker) {
            self.start = Some(self.line_num);
        }
        match self.start {
            Some(start) if line.contains('}') => Some(FieldBounds::new(start, self.line_num)),
            _ => None,
        }
    }
}

/// Locate `marker` in in-memory content
pub fn locate_field(content: &str, marker: &str) -> Result<FieldBounds, ManifestError> {
    let mut scanner = BoundsScanner::new(marker);
    content
        .lines()
        .find_map(|line| scanner.feed(line))
        .ok_or_else(|| ManifestError::field_not_found("<memory>", marker))
}

/// Locate `marker` while streaming lines from `reader`
pub async fn locate_field_streamed<R>(
    reader: R,
    marker: &str,
    path: &str,
) -> Result<FieldBounds, ManifestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut scanner = BoundsScanner::new(marker);
    let mut lines = reader.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ManifestError::read_error(path, e))?
    {
        if let Some(bounds) = scanner.feed(&line) {
            return Ok(bounds);
        }
    }
    Err(ManifestError::field_not_found(path, marker))
}

/// Locate `marker` in the post-patch content of `path`
pub async fn locate_field_in(
    source: &dyn FileContentSource,
    path: &str,
    marker: &str,
) -> Result<FieldBounds, ManifestError> {
    let reader = source.open(path).await?;
    locate_field_streamed(reader, marker, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CommitContentSource;

    const PACKAGE_JSON: &str = r#"{
  "name": "web",
  "dependencies": {
    "lodash": "4.0.0",
    "react": "18.0.0"
  },
  "devDependencies": {
    "jest": "29.0.0"
  }
}"#;

    #[test]
    fn test_locate_dependencies() {
        let bounds = locate_field(PACKAGE_JSON, "\"dependencies").unwrap();
        assert_eq!(bounds, FieldBounds::new(3, 6));
    }

    #[test]
    fn test_locate_dev_dependencies() {
        let bounds = locate_field(PACKAGE_JSON, "\"devDependencies\"").unwrap();
        assert_eq!(bounds, FieldBounds::new(7, 9));
    }

    #[test]
    fn test_single_line_field() {
        let content = "{\n  \"dependencies\": {},\n  \"name\": \"x\"\n}";
        let bounds = locate_field(content, "\"dependencies").unwrap();
        assert_eq!(bounds, FieldBounds::new(2, 2));
    }

    #[test]
    fn test_missing_marker() {
        let err = locate_field(PACKAGE_JSON, "\"peerDependencies\"").unwrap_err();
        assert!(err.is_field_not_found());
    }

    #[test]
    fn test_marker_without_closing_line() {
        let content = "{\n  \"dependencies\": {\n    \"a\": \"1\"\n";
        let err = locate_field(content, "\"dependencies").unwrap_err();
        assert!(err.is_field_not_found());
    }

    #[test]
    fn test_closing_brace_before_marker_is_ignored() {
        let content = "{\n  \"scripts\": {\n  },\n  \"dependencies\": {\n  }\n}";
        let bounds = locate_field(content, "\"dependencies").unwrap();
        assert_eq!(bounds, FieldBounds::new(4, 5));
    }

    #[test]
    fn test_substring_match_on_prefixed_key() {
        // an unquoted marker also matches inside "devDependencies"
        let content = "{\n  \"devDependencies\": {\n    \"jest\": \"29\"\n  }\n}";
        let bounds = locate_field(content, "Dependencies").unwrap();
        assert_eq!(bounds, FieldBounds::new(2, 4));
    }

    #[test]
    fn test_nested_object_closes_early() {
        let content = "{\n  \"dependencies\": {\n    \"a\": { \"version\": \"1\" },\n    \"b\": \"2\"\n  }\n}";
        let bounds = locate_field(content, "\"dependencies").unwrap();
        assert_eq!(bounds, FieldBounds::new(2, 3));
    }

    #[tokio::test]
    async fn test_streamed_matches_in_memory() {
        let bounds =
            locate_field_streamed(PACKAGE_JSON.as_bytes(), "\"devDependencies\"", "package.json")
                .await
                .unwrap();
        assert_eq!(bounds, locate_field(PACKAGE_JSON, "\"devDependencies\"").unwrap());
    }

    #[tokio::test]
    async fn test_streamed_handles_crlf() {
        let content = PACKAGE_JSON.replace('\n', "\r\n");
        let bounds = locate_field_streamed(content.as_bytes(), "\"dependencies", "package.json")
            .await
            .unwrap();
        assert_eq!(bounds, FieldBounds::new(3, 6));
    }

    #[tokio::test]
    async fn test_locate_in_source() {
        let mut source = CommitContentSource::default();
        source.insert("web/package.json", PACKAGE_JSON);

        let bounds = locate_field_in(&source, "web/package.json", "\"dependencies")
            .await
            .unwrap();
        assert_eq!(bounds, FieldBounds::new(3, 6));

        let err = locate_field_in(&source, "web/package.json", "\"optionalDependencies\"")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ManifestError::FieldNotFound { ref path, .. } if path == "web/package.json"
        ));
    }
}
