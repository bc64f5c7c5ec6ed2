//! Error types for campaign loading.

use thiserror::Error;
use wf_mechanics::MechError;

/// Result type for campaign operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A campaign or character definition that is malformed or inconsistent.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The campaign text is not valid JSON or has the wrong shape.
    #[error("malformed campaign: {0}")]
    Json(#[from] serde_json::Error),

    /// The campaign has no nodes at all.
    #[error("campaign has no nodes")]
    NoNodes,

    /// A node has an empty identifier.
    #[error("node #{index} has an empty id")]
    EmptyNodeId {
        /// Position of the node in the definition.
        index: usize,
    },

    /// Two nodes share an identifier.
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    /// A choice has an empty identifier.
    #[error("node '{node}' has a choice with an empty id")]
    EmptyChoiceId {
        /// Owning node.
        node: String,
    },

    /// Two choices in one node share an identifier.
    #[error("node '{node}' has duplicate choice id '{choice}'")]
    DuplicateChoice {
        /// Owning node.
        node: String,
        /// Repeated choice id.
        choice: String,
    },

    /// A choice targets a node that does not exist.
    #[error("choice '{choice}' in node '{node}' targets unknown node '{target}'")]
    DanglingTarget {
        /// Owning node.
        node: String,
        /// Offending choice.
        choice: String,
        /// Missing target.
        target: String,
    },

    /// An effect redirects to a node that does not exist.
    #[error("effect in {location} redirects to unknown node '{target}'")]
    DanglingRedirect {
        /// Where the effect lives, e.g. `node 'cave'` or `choice 'cave/enter'`.
        location: String,
        /// Missing target.
        target: String,
    },

    /// The designated start node does not exist.
    #[error("start node '{0}' does not exist")]
    MissingStart(String),

    /// An encounter references a monster that is neither in the bestiary nor built in.
    #[error("encounter in {location} references unknown monster '{monster}'")]
    UnknownMonster {
        /// Where the encounter lives.
        location: String,
        /// Unresolved monster reference.
        monster: String,
    },

    /// An effect has out-of-range parameters.
    #[error("invalid effect in {location}: {reason}")]
    InvalidEffect {
        /// Where the effect lives.
        location: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The character definition was rejected.
    #[error("{0}")]
    Character(#[from] MechError),
}
