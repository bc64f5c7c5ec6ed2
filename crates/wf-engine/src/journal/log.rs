//! Journal storage and export.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// A chronological log of session events, keeping the most recent entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
    total: u64,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl Journal {
    /// Create an empty journal retaining up to `capacity` entries (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            total: 0,
        }
    }

    /// Append an entry, dropping the oldest one when full.
    pub fn append(&mut self, entry: JournalEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.total += 1;
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries ever appended, including dropped ones.
    pub fn total_appended(&self) -> u64 {
        self.total
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Session Journal\n===============\n\n");
        let dropped = self.total - self.entries.len() as u64;
        if dropped > 0 {
            out.push_str(&format!("({dropped} earlier entries not retained)\n\n"));
        }
        for entry in &self.entries {
            match entry {
                JournalEntry::Opening { node, text } => {
                    out.push_str(&format!("--- Opening at {node} ---\n"));
                    out.push_str(text);
                    out.push_str("\n\n");
                }
                JournalEntry::Turn {
                    turn,
                    from,
                    choice,
                    to,
                    text,
                } => {
                    out.push_str(&format!("--- Turn {turn}: {from} -[{choice}]-> {to} ---\n"));
                    out.push_str(text);
                    out.push_str("\n\n");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(n: u64) -> JournalEntry {
        JournalEntry::Turn {
            turn: n,
            from: "a".to_string(),
            choice: "go".to_string(),
            to: "b".to_string(),
            text: format!("line {n}"),
        }
    }

    #[test]
    fn append_and_read() {
        let mut journal = Journal::default();
        assert!(journal.is_empty());
        journal.append(JournalEntry::Opening {
            node: "a".to_string(),
            text: "start".to_string(),
        });
        journal.append(turn(1));
        assert_eq!(journal.len(), 2);
        assert_eq!(journal.latest().map(JournalEntry::text), Some("line 1"));
        assert_eq!(journal.entries().map(JournalEntry::turn).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn retention_is_bounded() {
        let mut journal = Journal::with_capacity(3);
        for n in 1..=5 {
            journal.append(turn(n));
        }
        assert_eq!(journal.len(), 3);
        assert_eq!(journal.total_appended(), 5);
        assert_eq!(journal.entries().next().map(JournalEntry::turn), Some(3));
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut journal = Journal::with_capacity(0);
        journal.append(turn(1));
        journal.append(turn(2));
        assert_eq!(journal.capacity(), 1);
        assert_eq!(journal.latest().map(JournalEntry::turn), Some(2));
    }

    #[test]
    fn export_text() {
        let mut journal = Journal::with_capacity(1);
        journal.append(turn(1));
        journal.append(turn(2));
        let text = journal.export_text();
        assert!(text.starts_with("Session Journal"));
        assert!(text.contains("(1 earlier entries not retained)"));
        assert!(text.contains("--- Turn 2: a -[go]-> b ---\nline 2"));
        assert!(!text.contains("line 1"));
    }
}
