//! Player character state.
//!
//! A [`CharacterDefinition`] is the raw JSON shape; [`CharacterState`] is the
//! validated, mutable record that effects update during resolution. Hit
//! points always stay within `0..=max_hp`.

pub mod ability;
pub mod hit_points;

pub use ability::{Ability, AbilityScores, modifier_for};
pub use hit_points::HitPoints;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Valid range for an ability score.
pub const ABILITY_RANGE: std::ops::RangeInclusive<i32> = 1..=30;

/// A stat that effects and conditions can read or change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stat {
    /// Current hit points.
    Hp,
    /// Maximum hit points.
    MaxHp,
    /// Character level.
    Level,
    /// Armor class.
    ArmorClass,
    /// Proficiency bonus.
    Proficiency,
    /// One of the six ability scores.
    Ability(Ability),
    /// A campaign-defined attribute such as `gold`.
    Attribute(String),
}

impl Stat {
    /// Parse a stat name. Names that are not built in become attributes.
    pub fn parse(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase();
        match key.as_str() {
            "hp" | "current_hp" => Self::Hp,
            "max_hp" => Self::MaxHp,
            "level" => Self::Level,
            "ac" => Self::ArmorClass,
            "prof" | "proficiency_bonus" => Self::Proficiency,
            other => match Ability::parse(other) {
                Some(ability) => Self::Ability(ability),
                None => Self::Attribute(key),
            },
        }
    }

    /// Whether this stat is current hit points.
    pub fn is_hp(&self) -> bool {
        matches!(self, Self::Hp)
    }
}

impl From<String> for Stat {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Stat> for String {
    fn from(stat: Stat) -> Self {
        stat.to_string()
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hp => f.write_str("hp"),
            Self::MaxHp => f.write_str("max_hp"),
            Self::Level => f.write_str("level"),
            Self::ArmorClass => f.write_str("ac"),
            Self::Proficiency => f.write_str("prof"),
            Self::Ability(a) => f.write_str(a.short()),
            Self::Attribute(name) => f.write_str(name),
        }
    }
}

fn default_level() -> i64 {
    1
}

fn default_ac() -> i32 {
    10
}

fn default_proficiency() -> i32 {
    2
}

/// A character as written in JSON, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    /// Display name.
    pub name: String,
    /// Level, validated into `0..=255`.
    #[serde(default = "default_level")]
    pub level: i64,
    /// Ability scores (missing scores default to 10).
    #[serde(default)]
    pub abilities: AbilityScores,
    /// Maximum hit points, must be positive.
    pub max_hp: i64,
    /// Current hit points; defaults to `max_hp`.
    #[serde(default)]
    pub current_hp: Option<i64>,
    /// Armor class.
    #[serde(default = "default_ac")]
    pub ac: i32,
    /// Proficiency bonus.
    #[serde(default = "default_proficiency")]
    pub proficiency_bonus: i32,
    /// Campaign-defined numeric attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, i32>,
    /// Inventory and story flags.
    #[serde(default)]
    pub flags: BTreeSet<String>,
}

/// The validated, mutable player character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterState {
    name: String,
    level: u8,
    abilities: AbilityScores,
    hp: HitPoints,
    ac: i32,
    proficiency_bonus: i32,
    attributes: BTreeMap<String, i32>,
    flags: BTreeSet<String>,
}

fn reject(reason: impl Into<String>) -> MechError {
    MechError::InvalidCharacter(reason.into())
}

impl CharacterState {
    /// Parse and validate a character from JSON.
    pub fn from_json(text: &str) -> MechResult<Self> {
        let def: CharacterDefinition = serde_json::from_str(text)?;
        Self::load(def)
    }

    /// Validate a parsed definition.
    pub fn load(def: CharacterDefinition) -> MechResult<Self> {
        let name = def.name.trim();
        if name.is_empty() {
            return Err(reject("name must not be blank"));
        }
        let level =
            u8::try_from(def.level).map_err(|_| reject(format!("level {} is outside 0..=255", def.level)))?;
        if def.max_hp <= 0 {
            return Err(reject(format!("max_hp must be positive, got {}", def.max_hp)));
        }
        let max_hp =
            i32::try_from(def.max_hp).map_err(|_| reject(format!("max_hp {} is too large", def.max_hp)))?;
        let current_hp = def.current_hp.unwrap_or(def.max_hp);
        if current_hp < 0 {
            return Err(reject(format!("current_hp must not be negative, got {current_hp}")));
        }
        if current_hp > def.max_hp {
            return Err(reject(format!(
                "current_hp {current_hp} exceeds max_hp {}",
                def.max_hp
            )));
        }
        for ability in Ability::ALL {
            let score = def.abilities.score(ability);
            if !ABILITY_RANGE.contains(&score) {
                return Err(reject(format!(
                    "{} score {score} is outside 1..=30",
                    ability.short()
                )));
            }
        }

        let current = i32::try_from(current_hp).unwrap_or(max_hp);

        Ok(Self {
            name: name.to_string(),
            level,
            abilities: def.abilities,
            hp: HitPoints::new(current, max_hp),
            ac: def.ac,
            proficiency_bonus: def.proficiency_bonus,
            attributes: def
                .attributes
                .into_iter()
                .map(|(k, v)| (k.trim().to_ascii_lowercase(), v))
                .collect(),
            flags: def.flags,
        })
    }

    /// Character name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Character level.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Hit points.
    pub fn hp(&self) -> HitPoints {
        self.hp
    }

    /// Armor class.
    pub fn ac(&self) -> i32 {
        self.ac
    }

    /// Proficiency bonus.
    pub fn proficiency_bonus(&self) -> i32 {
        self.proficiency_bonus
    }

    /// Ability scores.
    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    /// Campaign-defined attributes.
    pub fn attributes(&self) -> &BTreeMap<String, i32> {
        &self.attributes
    }

    /// Flags currently set.
    pub fn flags(&self) -> &BTreeSet<String> {
        &self.flags
    }

    /// Current value of a stat. Unknown attributes read as 0.
    pub fn stat(&self, stat: &Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp.current(),
            Stat::MaxHp => self.hp.max(),
            Stat::Level => i32::from(self.level),
            Stat::ArmorClass => self.ac,
            Stat::Proficiency => self.proficiency_bonus,
            Stat::Ability(a) => self.abilities.score(*a),
            Stat::Attribute(name) => self.attributes.get(name).copied().unwrap_or(0),
        }
    }

    /// Modifier for an ability.
    pub fn ability_modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    /// Value a dice-expression bonus resolves to: ability names give the
    /// modifier, any other name gives the stat's value.
    pub fn modifier(&self, name: &str) -> i32 {
        match Stat::parse(name) {
            Stat::Ability(a) => self.ability_modifier(a),
            other => self.stat(&other),
        }
    }

    /// Apply a delta to a stat and return its new value.
    ///
    /// Hit points clamp to `0..=max_hp`, `max_hp` stays at least 1 and
    /// re-clamps the current value, and `level` saturates in `0..=255`.
    /// Everything else is saturating `i32` arithmetic.
    pub fn apply_stat_delta(&mut self, stat: &Stat, amount: i32) -> i32 {
        let value = match stat {
            Stat::Hp => self.hp.adjust(amount),
            Stat::MaxHp => {
                self.hp.set_max(self.hp.max().saturating_add(amount));
                self.hp.max()
            }
            Stat::Level => {
                let level = (i32::from(self.level) + amount.clamp(-255, 255)).clamp(0, 255);
                self.level = u8::try_from(level).unwrap_or(u8::MAX);
                i32::from(self.level)
            }
            Stat::ArmorClass => {
                self.ac = self.ac.saturating_add(amount);
                self.ac
            }
            Stat::Proficiency => {
                self.proficiency_bonus = self.proficiency_bonus.saturating_add(amount);
                self.proficiency_bonus
            }
            Stat::Ability(a) => {
                let score = self.abilities.score_mut(*a);
                *score = score.saturating_add(amount);
                *score
            }
            Stat::Attribute(name) => {
                let slot = self.attributes.entry(name.clone()).or_insert(0);
                *slot = slot.saturating_add(amount);
                *slot
            }
        };
        tracing::trace!(%stat, amount, value, "stat delta applied");
        value
    }

    /// Set a flag. Returns `true` if it was not already set.
    pub fn set_flag(&mut self, flag: &str) -> bool {
        self.flags.insert(flag.to_string())
    }

    /// Clear a flag. Returns `true` if it was set.
    pub fn clear_flag(&mut self, flag: &str) -> bool {
        self.flags.remove(flag)
    }

    /// Whether a flag is set.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// One-line summary, e.g. `Aria (Lv 1) HP 12/12`.
    pub fn summary(&self) -> String {
        format!("{} (Lv {}) HP {}", self.name, self.level, self.hp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARIA: &str = r#"{
        "name": "Aria", "level": 1,
        "abilities": {"str": 16, "dex": 12, "con": 14, "int": 10, "wis": 11, "cha": 8},
        "max_hp": 12, "current_hp": 12, "ac": 16, "proficiency_bonus": 2,
        "attributes": {"gold": 10}, "flags": ["torch"]
    }"#;

    fn aria() -> CharacterState {
        CharacterState::from_json(ARIA).unwrap()
    }

    fn def(max_hp: i64) -> CharacterDefinition {
        serde_json::from_value(serde_json::json!({"name": "Test", "max_hp": max_hp})).unwrap()
    }

    #[test]
    fn loads_full_definition() {
        let c = aria();
        assert_eq!(c.name(), "Aria");
        assert_eq!(c.level(), 1);
        assert_eq!(c.hp(), HitPoints::new(12, 12));
        assert_eq!(c.ac(), 16);
        assert_eq!(c.stat(&Stat::parse("gold")), 10);
        assert!(c.has_flag("torch"));
        assert_eq!(c.summary(), "Aria (Lv 1) HP 12/12");
    }

    #[test]
    fn applies_defaults() {
        let c = CharacterState::load(def(9)).unwrap();
        assert_eq!(c.level(), 1);
        assert_eq!(c.hp().current(), 9);
        assert_eq!(c.ac(), 10);
        assert_eq!(c.proficiency_bonus(), 2);
        assert_eq!(c.abilities(), &AbilityScores::default());
    }

    #[test]
    fn rejects_bad_definitions() {
        let cases = [
            serde_json::json!({"name": "  ", "max_hp": 5}),
            serde_json::json!({"name": "A", "max_hp": 0}),
            serde_json::json!({"name": "A", "max_hp": -3}),
            serde_json::json!({"name": "A", "max_hp": 5, "current_hp": 6}),
            serde_json::json!({"name": "A", "max_hp": 5, "current_hp": -1}),
            serde_json::json!({"name": "A", "max_hp": 5, "level": -1}),
            serde_json::json!({"name": "A", "max_hp": 5, "level": 256}),
            serde_json::json!({"name": "A", "max_hp": 5, "abilities": {"str": 0}}),
            serde_json::json!({"name": "A", "max_hp": 5, "abilities": {"cha": 31}}),
        ];
        for case in cases {
            let def: CharacterDefinition = serde_json::from_value(case.clone()).unwrap();
            assert!(
                matches!(CharacterState::load(def), Err(MechError::InvalidCharacter(_))),
                "accepted {case}"
            );
        }
    }

    #[test]
    fn level_255_is_accepted() {
        let mut d = def(5);
        d.level = 255;
        let mut c = CharacterState::load(d).unwrap();
        assert_eq!(c.level(), 255);
        assert_eq!(c.apply_stat_delta(&Stat::Level, 3), 255);
        assert_eq!(c.apply_stat_delta(&Stat::Level, -300), 0);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            CharacterState::from_json("{\"name\": 3}"),
            Err(MechError::Json(_))
        ));
    }

    #[test]
    fn stat_names() {
        assert_eq!(Stat::parse("HP"), Stat::Hp);
        assert_eq!(Stat::parse("current_hp"), Stat::Hp);
        assert_eq!(Stat::parse("proficiency_bonus"), Stat::Proficiency);
        assert_eq!(Stat::parse("Strength"), Stat::Ability(Ability::Strength));
        assert_eq!(Stat::parse("Gold"), Stat::Attribute("gold".into()));
        assert_eq!(Stat::parse("wis").to_string(), "wis");
    }

    #[test]
    fn modifier_resolves_abilities_and_stats() {
        let c = aria();
        assert_eq!(c.modifier("str"), 3);
        assert_eq!(c.modifier("cha"), -1);
        assert_eq!(c.modifier("prof"), 2);
        assert_eq!(c.modifier("gold"), 10);
        assert_eq!(c.modifier("unknown"), 0);
    }

    #[test]
    fn max_hp_delta_reclamps() {
        let mut c = aria();
        assert_eq!(c.apply_stat_delta(&Stat::MaxHp, -4), 8);
        assert_eq!(c.hp().current(), 8);
        assert_eq!(c.apply_stat_delta(&Stat::MaxHp, -100), 1);
    }

    #[test]
    fn attributes_are_created_on_demand() {
        let mut c = aria();
        assert_eq!(c.apply_stat_delta(&Stat::parse("rations"), 3), 3);
        assert_eq!(c.apply_stat_delta(&Stat::parse("gold"), -15), -5);
    }

    #[test]
    fn flags() {
        let mut c = aria();
        assert!(c.set_flag("key"));
        assert!(!c.set_flag("key"));
        assert!(c.clear_flag("torch"));
        assert!(!c.has_flag("torch"));
        assert!(!c.clear_flag("torch"));
    }

    proptest! {
        #[test]
        fn hp_stays_clamped(deltas in proptest::collection::vec(any::<i32>(), 1..20)) {
            let mut c = aria();
            for delta in deltas {
                let hp = c.apply_stat_delta(&Stat::Hp, delta);
                prop_assert!(hp >= 0);
                prop_assert!(hp <= c.hp().max());
            }
        }

        #[test]
        fn max_hp_changes_keep_current_in_range(
            deltas in proptest::collection::vec((any::<bool>(), -50i32..50), 1..20)
        ) {
            let mut c = aria();
            for (on_max, delta) in deltas {
                let stat = if on_max { Stat::MaxHp } else { Stat::Hp };
                c.apply_stat_delta(&stat, delta);
                prop_assert!(c.hp().max() >= 1);
                prop_assert!((0..=c.hp().max()).contains(&c.hp().current()));
            }
        }
    }
}
