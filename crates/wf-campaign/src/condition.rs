//! Preconditions that decide whether a choice is visible.

use serde::{Deserialize, Serialize};
use wf_mechanics::{CharacterState, Stat};

/// A condition evaluated against the character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// Always true.
    #[default]
    Always,
    /// A stat is at least `value`.
    StatAtLeast {
        /// Stat to read.
        stat: Stat,
        /// Inclusive lower bound.
        value: i32,
    },
    /// A stat is at most `value`.
    StatAtMost {
        /// Stat to read.
        stat: Stat,
        /// Inclusive upper bound.
        value: i32,
    },
    /// A flag is set.
    HasFlag {
        /// Flag name.
        flag: String,
    },
    /// Logical NOT.
    Not {
        /// Negated condition.
        condition: Box<Condition>,
    },
    /// Logical AND. An empty list is true.
    All {
        /// Conditions that must all hold.
        conditions: Vec<Condition>,
    },
    /// Logical OR. An empty list is false.
    Any {
        /// Conditions of which one must hold.
        conditions: Vec<Condition>,
    },
}

impl Condition {
    /// Evaluate against the current character state.
    pub fn evaluate(&self, character: &CharacterState) -> bool {
        match self {
            Condition::Always => true,
            Condition::StatAtLeast { stat, value } => character.stat(stat) >= *value,
            Condition::StatAtMost { stat, value } => character.stat(stat) <= *value,
            Condition::HasFlag { flag } => character.has_flag(flag),
            Condition::Not { condition } => !condition.evaluate(character),
            Condition::All { conditions } => conditions.iter().all(|c| c.evaluate(character)),
            Condition::Any { conditions } => conditions.iter().any(|c| c.evaluate(character)),
        }
    }
}
