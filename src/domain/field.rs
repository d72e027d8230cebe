//! Line ranges of JSON fields inside a manifest

use serde::{Deserialize, Serialize};

/// 1-based inclusive line range of a field's value block
///
/// `start` is the line containing the field marker, `end` the first line at or
/// after it that contains a closing brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub start: u32,
    pub end: u32,
}

impl FieldBounds {
    /// Creates a new range
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns true if `line` falls inside the range
    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }
}
