//! Campaign store for the Wayfarer solo adventure engine.
//!
//! A campaign is an immutable graph of [`Node`]s joined by [`Choice`]s.
//! Nodes and choices carry [`Effect`]s that change the character or redirect
//! navigation, and choices may be hidden behind a [`Condition`]. Every
//! reference in the graph is checked when the campaign is loaded, so a
//! [`Campaign`] that exists is always internally consistent.

pub mod campaign;
pub mod condition;
pub mod effect;
pub mod error;
pub mod node;
mod validate;

pub use campaign::{Campaign, CampaignDefinition};
pub use condition::Condition;
pub use effect::{Amount, Effect, MonsterRef};
pub use error::{SchemaError, SchemaResult};
pub use node::{Choice, Node};
