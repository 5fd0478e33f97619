/// Text panel lookup table
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accompanying text for a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPanelEntry {
    /// Lookup key referenced by [`TrackDescriptor::text_panel_key`](crate::TrackDescriptor)
    pub key: String,

    /// Panel heading
    pub title: String,

    /// Panel body (may span several lines)
    pub body: String,
}

impl TextPanelEntry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Immutable key → entry table
///
/// A missing key is a normal outcome; callers render their own fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLibrary {
    entries: HashMap<String, TextPanelEntry>,
}

impl TextLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library, rejecting duplicate keys
    pub fn from_entries(entries: impl IntoIterator<Item = TextPanelEntry>) -> Result<Self> {
        let mut library = Self::new();
        for entry in entries {
            if library.entries.contains_key(&entry.key) {
                return Err(CoreError::DuplicateTextKey(entry.key));
            }
            library.entries.insert(entry.key.clone(), entry);
        }
        Ok(library)
    }

    /// Look up an entry by key
    pub fn get(&self, key: &str) -> Option<&TextPanelEntry> {
        self.entries.get(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key
    pub fn entries(&self) -> Vec<&TextPanelEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key() {
        let library = TextLibrary::from_entries(vec![
            TextPanelEntry::new("heart", "Heart Sutra", "Form is emptiness"),
            TextPanelEntry::new("diamond", "Diamond Sutra", "Thus have I heard"),
        ])
        .unwrap();

        assert_eq!(library.len(), 2);
        assert_eq!(library.get("heart").unwrap().title, "Heart Sutra");
        assert!(library.get("lotus").is_none());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let result = TextLibrary::from_entries(vec![
            TextPanelEntry::new("heart", "One", ""),
            TextPanelEntry::new("heart", "Two", ""),
        ]);

        assert!(matches!(result, Err(CoreError::DuplicateTextKey(key)) if key == "heart"));
    }

    #[test]
    fn entries_are_sorted_by_key() {
        let library = TextLibrary::from_entries(vec![
            TextPanelEntry::new("b", "B", ""),
            TextPanelEntry::new("a", "A", ""),
        ])
        .unwrap();

        let keys: Vec<_> = library.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
