//! Run-scoped warning collector.

use std::collections::BTreeSet;

/// Append-only, de-duplicating set of data-quality messages.
///
/// Owned by the run, not by any one record. Inserting the same message
/// twice is a no-op. Flushed sorted so repeated runs over unchanged
/// input yield byte-identical artifacts.
#[derive(Debug, Default, Clone)]
pub struct WarningSet {
    messages: BTreeSet<String>,
}

impl WarningSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning. Returns true if the message was new.
    pub fn push(&mut self, message: impl Into<String>) -> bool {
        self.messages.insert(message.into())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Drain into the sorted list written to the artifact.
    pub fn into_sorted(self) -> Vec<String> {
        self.messages.into_iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}
