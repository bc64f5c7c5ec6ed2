//! Resolution engine for the Wayfarer solo adventure engine.
//!
//! An [`Engine`] owns one play session: the validated campaign, the
//! character, the random sequence, and the journal. `choose` is the only
//! mutator and commits all of its changes at once or none of them.
//! [`view::project`] turns the current state into a [`ViewSnapshot`] for a
//! presentation layer, and [`SessionHost`] wraps a session behind a mutex
//! for hosts that call in from foreign threads.

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod journal;
mod resolve;
pub mod view;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use host::SessionHost;
pub use journal::{Journal, JournalEntry};
pub use view::{CharacterSummary, ChoiceView, SerializationError, ViewSnapshot};
