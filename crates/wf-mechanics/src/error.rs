//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A character definition violates a range or consistency rule.
    #[error("invalid character: {0}")]
    InvalidCharacter(String),

    /// A dice expression could not be parsed.
    #[error("invalid dice expression '{expr}': {reason}")]
    InvalidDice {
        /// The expression as written.
        expr: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An ability name is not one of the six ability scores.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// A definition is not valid JSON or does not have the expected shape.
    #[error("malformed character definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
