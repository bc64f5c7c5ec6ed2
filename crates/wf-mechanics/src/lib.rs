//! Game mechanics for the Wayfarer solo adventure engine.
//!
//! Provides the seeded random sequence generator, dice expressions,
//! character state with clamped hit points, d20 ability checks, and
//! automatic combat against bestiary monsters. Every random outcome is
//! drawn from a single [`Rsg`] so that a seed reproduces a session.

pub mod character;
pub mod check;
pub mod combat;
pub mod dice;
pub mod error;
pub mod rng;

pub use character::{Ability, AbilityScores, CharacterDefinition, CharacterState, HitPoints, Stat};
pub use check::{AbilityCheck, CheckRoll};
pub use combat::{CombatOutcome, CombatReport, MonsterStats, run_encounter};
pub use dice::{Bonus, DiceExpr, Die, DieResult, RollResult};
pub use error::{MechError, MechResult};
pub use rng::Rsg;
