//! Journal entry types.

use serde::{Deserialize, Serialize};

/// A single entry in the session journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JournalEntry {
    /// Log text produced by arrival effects when the session started.
    Opening {
        /// Node the session settled on.
        node: String,
        /// Joined log lines.
        text: String,
    },
    /// Log text produced by taking a choice.
    Turn {
        /// Turn number, starting at 1.
        turn: u64,
        /// Node the choice was taken from.
        from: String,
        /// Choice taken.
        choice: String,
        /// Node the session settled on.
        to: String,
        /// Joined log lines.
        text: String,
    },
}

impl JournalEntry {
    /// The log text of this entry.
    pub fn text(&self) -> &str {
        match self {
            JournalEntry::Opening { text, .. } | JournalEntry::Turn { text, .. } => text,
        }
    }

    /// Turn number; the opening entry is turn 0.
    pub fn turn(&self) -> u64 {
        match self {
            JournalEntry::Opening { .. } => 0,
            JournalEntry::Turn { turn, .. } => *turn,
        }
    }
}
