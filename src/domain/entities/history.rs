//! Session-local prompt history.

use chrono::{DateTime, Local};

use super::prompt::{Prompt, PromptId};

/// Session-local key distinguishing entries that share the same prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(u64);

impl EntryKey {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One submitted prompt and, once generation succeeds, its identifier.
///
/// Entries are immutable; [`HistoryEntry::identified`] returns a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    key: EntryKey,
    display_label: String,
    full_prompt: String,
    prompt_id: Option<PromptId>,
    created_at: DateTime<Local>,
}

impl HistoryEntry {
    /// Creates a pending entry for a freshly submitted prompt.
    #[must_use]
    pub fn pending(key: EntryKey, prompt: &Prompt) -> Self {
        Self {
            key,
            display_label: prompt.first_line().to_string(),
            full_prompt: prompt.as_str().to_string(),
            prompt_id: None,
            created_at: Local::now(),
        }
    }

    /// Returns a copy of this entry carrying the server identifier.
    #[must_use]
    pub fn identified(&self, prompt_id: PromptId) -> Self {
        Self {
            prompt_id: Some(prompt_id),
            ..self.clone()
        }
    }

    #[must_use]
    pub const fn key(&self) -> EntryKey {
        self.key
    }

    #[must_use]
    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    #[must_use]
    pub fn full_prompt(&self) -> &str {
        &self.full_prompt
    }

    #[must_use]
    pub const fn prompt_id(&self) -> Option<&PromptId> {
        self.prompt_id.as_ref()
    }

    /// Returns true while the generation request has not succeeded.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.prompt_id.is_none()
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

/// Ordered history, newest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry at the top of the list.
    pub fn prepend(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// Removes the entry with the given key, returning it if present.
    pub fn remove(&mut self, key: EntryKey) -> Option<HistoryEntry> {
        let index = self.position(key)?;
        Some(self.entries.remove(index))
    }

    /// Replaces the entry with an identified copy. Returns false if the key is
    /// unknown.
    pub fn identify(&mut self, key: EntryKey, prompt_id: PromptId) -> bool {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                *entry = entry.identified(prompt_id);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, key: EntryKey) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn position(&self, key: EntryKey) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries still waiting on the server.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_pending()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u64, text: &str) -> HistoryEntry {
        HistoryEntry::pending(EntryKey::new(key), &Prompt::new(text).unwrap())
    }

    #[test]
    fn test_pending_entry_uses_first_line_as_label() {
        let entry = entry(1, "A cat\nwearing a hat");
        assert_eq!(entry.display_label(), "A cat");
        assert_eq!(entry.full_prompt(), "A cat\nwearing a hat");
        assert!(entry.is_pending());
    }

    #[test]
    fn test_prepend_orders_newest_first() {
        let mut history = History::new();
        history.prepend(entry(1, "first"));
        history.prepend(entry(2, "second"));

        let labels: Vec<_> = history.iter().map(HistoryEntry::display_label).collect();
        assert_eq!(labels, vec!["second", "first"]);
    }

    #[test]
    fn test_identify_replaces_record() {
        let mut history = History::new();
        let original = entry(1, "x");
        history.prepend(original.clone());

        assert!(history.identify(EntryKey::new(1), PromptId::new("42").unwrap()));

        let updated = history.get(EntryKey::new(1)).unwrap();
        assert_eq!(updated.prompt_id().map(PromptId::as_str), Some("42"));
        assert!(original.is_pending());
        assert_eq!(history.pending_count(), 0);
    }

    #[test]
    fn test_identify_unknown_key() {
        let mut history = History::new();
        assert!(!history.identify(EntryKey::new(9), PromptId::new("1").unwrap()));
    }

    #[test]
    fn test_duplicate_prompts_are_distinct() {
        let mut history = History::new();
        history.prepend(entry(1, "same"));
        history.prepend(entry(2, "same"));

        let removed = history.remove(EntryKey::new(1)).unwrap();
        assert_eq!(removed.key(), EntryKey::new(1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.get_index(0).unwrap().key(), EntryKey::new(2));
    }
}
