//! The URL collaborator of the viewer.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Session history as seen by the viewer: the current query string plus
/// push- and replace-style updates.
///
/// A browser host implements this over `location.search` and
/// `history.pushState` / `history.replaceState`.
pub trait History {
    /// Current query string, with or without a leading `?`.
    fn query(&self) -> String;
    /// Navigate to `query`, creating a new history entry.
    fn push(&mut self, query: &str);
    /// Swap the current entry's query for `query`.
    fn replace(&mut self, query: &str);
}

/// In-memory history with back/forward, for non-browser hosts and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    /// History with a single entry.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            entries: vec![query.into()],
            cursor: 0,
        }
    }

    /// Step back. Returns `false` at the first entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward. Returns `false` at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: there is at least the initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl History for MemoryHistory {
    fn query(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, query: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(String::from(query));
        self.cursor += 1;
    }

    fn replace(&mut self, query: &str) {
        self.entries[self.cursor] = String::from(query);
    }
}
