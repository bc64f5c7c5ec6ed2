//! Error types for the resolution engine.

use thiserror::Error;
use wf_campaign::SchemaError;
use wf_mechanics::MechError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running a session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The campaign or character definition was rejected.
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// The choice is unknown or hidden at the current node.
    #[error("choice '{choice}' is not available at node '{node}'")]
    InvalidChoice {
        /// Node the session is parked at.
        node: String,
        /// Requested choice id.
        choice: String,
    },

    /// Arrival effects kept redirecting past the configured bound.
    #[error("more than {limit} redirects after arriving at node '{node}'")]
    RedirectLoop {
        /// Node where the chain started.
        node: String,
        /// Configured bound.
        limit: u32,
    },

    /// A node id that passed validation could not be found.
    #[error("node '{0}' is missing from the campaign")]
    MissingNode(String),

    /// A monster reference that passed validation could not be found.
    #[error("monster '{0}' is missing from the campaign")]
    UnknownMonster(String),

    /// No session has been initialized.
    #[error("no session is initialized")]
    NotInitialized,

    /// The view could not be serialized.
    #[error("failed to serialize view: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<MechError> for EngineError {
    fn from(err: MechError) -> Self {
        EngineError::Schema(SchemaError::Character(err))
    }
}

impl EngineError {
    /// Whether the session is left usable after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidChoice { .. } | EngineError::RedirectLoop { .. }
        )
    }
}
