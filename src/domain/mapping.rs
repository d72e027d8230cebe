//! Per-block accumulation of change records

use super::DependencyChange;

/// Mapping from dependency name to its current best-known change record
///
/// Names are unique. Iteration follows insertion order, which is the order the
/// first line for each name was seen in the file's hunks. One mapping covers a
/// single dependency block of a single file.
///
/// Lookups scan the backing `Vec`, so folding `n` lines costs O(n²); blocks
/// are a few dozen lines at most.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeMapping {
    entries: Vec<DependencyChange>,
}

impl ChangeMapping {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `name`, if any
    pub fn get(&self, name: &str) -> Option<&DependencyChange> {
        self.entries.iter().find(|c| c.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut DependencyChange> {
        self.entries.iter_mut().find(|c| c.name == name)
    }

    /// Inserts a record for a name that has none yet
    pub(crate) fn insert(&mut self, change: DependencyChange) {
        debug_assert!(self.get(&change.name).is_none());
        self.entries.push(change);
    }

    /// Deletes the record for `name`, keeping the order of the others
    pub(crate) fn remove(&mut self, name: &str) -> Option<DependencyChange> {
        let idx = self.entries.iter().position(|c| c.name == name)?;
        Some(self.entries.remove(idx))
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no record is live
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DependencyChange> {
        self.entries.iter()
    }
}

impl IntoIterator for ChangeMapping {
    type Item = DependencyChange;
    type IntoIter = std::vec::IntoIter<DependencyChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut mapping = ChangeMapping::new();
        mapping.insert(DependencyChange::added("lodash", "4.0.0"));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("lodash").map(|c| c.version.as_str()), Some("4.0.0"));
        assert!(mapping.get("react").is_none());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut mapping = ChangeMapping::new();
        mapping.insert(DependencyChange::added("a", "1"));
        mapping.insert(DependencyChange::added("b", "1"));
        mapping.insert(DependencyChange::added("c", "1"));

        assert!(mapping.remove("b").is_some());
        assert!(mapping.remove("b").is_none());

        let names: Vec<_> = mapping.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_empty() {
        let mapping = ChangeMapping::new();
        assert!(mapping.is_empty());
        assert_eq!(mapping.into_iter().count(), 0);
    }
}
