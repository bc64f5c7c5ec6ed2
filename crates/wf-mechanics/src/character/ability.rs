//! The six ability scores and their modifiers.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// One of the six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ability {
    /// Strength.
    Strength,
    /// Dexterity.
    Dexterity,
    /// Constitution.
    Constitution,
    /// Intelligence.
    Intelligence,
    /// Wisdom.
    Wisdom,
    /// Charisma.
    Charisma,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Parse a short (`STR`) or long (`strength`) name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "str" | "strength" => Some(Self::Strength),
            "dex" | "dexterity" => Some(Self::Dexterity),
            "con" | "constitution" => Some(Self::Constitution),
            "int" | "intelligence" => Some(Self::Intelligence),
            "wis" | "wisdom" => Some(Self::Wisdom),
            "cha" | "charisma" => Some(Self::Charisma),
            _ => None,
        }
    }

    /// Three-letter lowercase abbreviation.
    pub fn short(self) -> &'static str {
        match self {
            Self::Strength => "str",
            Self::Dexterity => "dex",
            Self::Constitution => "con",
            Self::Intelligence => "int",
            Self::Wisdom => "wis",
            Self::Charisma => "cha",
        }
    }

    /// Full name, capitalised for log text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }
}

impl TryFrom<String> for Ability {
    type Error = MechError;

    fn try_from(value: String) -> MechResult<Self> {
        Self::parse(&value).ok_or(MechError::UnknownAbility(value))
    }
}

impl From<Ability> for String {
    fn from(ability: Ability) -> Self {
        ability.short().to_string()
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short())
    }
}

/// The modifier for an ability score: `(score - 10) / 2`, truncated toward
/// zero.
pub fn modifier_for(score: i32) -> i32 {
    score.saturating_sub(10) / 2
}

/// A character's six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScores {
    /// Strength score.
    pub str: i32,
    /// Dexterity score.
    pub dex: i32,
    /// Constitution score.
    pub con: i32,
    /// Intelligence score.
    #[serde(rename = "int")]
    pub int_: i32,
    /// Wisdom score.
    pub wis: i32,
    /// Charisma score.
    pub cha: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            str: 10,
            dex: 10,
            con: 10,
            int_: 10,
            wis: 10,
            cha: 10,
        }
    }
}

impl AbilityScores {
    /// The score for an ability.
    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.str,
            Ability::Dexterity => self.dex,
            Ability::Constitution => self.con,
            Ability::Intelligence => self.int_,
            Ability::Wisdom => self.wis,
            Ability::Charisma => self.cha,
        }
    }

    /// Mutable access to the score for an ability.
    pub fn score_mut(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Strength => &mut self.str,
            Ability::Dexterity => &mut self.dex,
            Ability::Constitution => &mut self.con,
            Ability::Intelligence => &mut self.int_,
            Ability::Wisdom => &mut self.wis,
            Ability::Charisma => &mut self.cha,
        }
    }

    /// The modifier for an ability.
    pub fn modifier(&self, ability: Ability) -> i32 {
        modifier_for(self.score(ability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_short_and_long_names() {
        assert_eq!(Ability::parse("STR"), Some(Ability::Strength));
        assert_eq!(Ability::parse("wisdom"), Some(Ability::Wisdom));
        assert_eq!(Ability::parse(" Cha "), Some(Ability::Charisma));
        assert_eq!(Ability::parse("luck"), None);
    }

    #[test]
    fn modifiers_truncate_toward_zero() {
        assert_eq!(modifier_for(10), 0);
        assert_eq!(modifier_for(11), 0);
        assert_eq!(modifier_for(16), 3);
        assert_eq!(modifier_for(9), 0);
        assert_eq!(modifier_for(8), -1);
        assert_eq!(modifier_for(7), -1);
        assert_eq!(modifier_for(5), -2);
        assert_eq!(modifier_for(1), -4);
        assert_eq!(modifier_for(30), 10);
    }

    #[test]
    fn modifier_saturates_at_extreme_scores() {
        assert_eq!(modifier_for(i32::MIN), i32::MIN / 2);
        assert_eq!(modifier_for(i32::MAX), (i32::MAX - 10) / 2);
    }

    #[test]
    fn scores_deserialize_with_defaults() {
        let scores: AbilityScores = serde_json::from_str(r#"{"str": 16, "int": 8}"#).unwrap();
        assert_eq!(scores.score(Ability::Strength), 16);
        assert_eq!(scores.score(Ability::Intelligence), 8);
        assert_eq!(scores.score(Ability::Dexterity), 10);
        assert_eq!(scores.modifier(Ability::Strength), 3);
    }

    #[test]
    fn ability_serde_uses_short_name() {
        let json = serde_json::to_string(&Ability::Dexterity).unwrap();
        assert_eq!(json, "\"dex\"");
        let parsed: Ability = serde_json::from_str("\"Constitution\"").unwrap();
        assert_eq!(parsed, Ability::Constitution);
        assert!(serde_json::from_str::<Ability>("\"luck\"").is_err());
    }
}
