//! d20 ability checks.

use serde::{Deserialize, Serialize};

use crate::character::{Ability, CharacterState};
use crate::rng::Rsg;

/// An ability check against a difficulty class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCheck {
    /// Ability whose modifier is added.
    pub ability: Ability,
    /// Difficulty class the total must meet or beat.
    pub dc: i32,
    /// Whether the proficiency bonus is added too.
    #[serde(default)]
    pub proficient: bool,
}

/// The outcome of rolling an [`AbilityCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckRoll {
    /// The natural d20 value.
    pub roll: u32,
    /// Total modifier added to the roll.
    pub modifier: i32,
    /// Roll plus modifier.
    pub total: i32,
    /// Difficulty class rolled against.
    pub dc: i32,
    /// Whether `total >= dc`.
    pub success: bool,
}

impl AbilityCheck {
    /// Create a check without proficiency.
    pub fn new(ability: Ability, dc: i32) -> Self {
        Self {
            ability,
            dc,
            proficient: false,
        }
    }

    /// The modifier this check adds for a character.
    pub fn modifier(&self, character: &CharacterState) -> i32 {
        let base = character.ability_modifier(self.ability);
        if self.proficient {
            base.saturating_add(character.proficiency_bonus())
        } else {
            base
        }
    }

    /// Roll the check, drawing exactly one d20.
    pub fn roll(&self, character: &CharacterState, rsg: &mut Rsg) -> CheckRoll {
        let roll = rsg.roll(20);
        let modifier = self.modifier(character);
        let total = i32::try_from(roll).unwrap_or(20).saturating_add(modifier);
        let success = total >= self.dc;
        tracing::debug!(ability = %self.ability, dc = self.dc, roll, modifier, total, success, "ability check");
        CheckRoll {
            roll,
            modifier,
            total,
            dc: self.dc,
            success,
        }
    }
}

impl std::fmt::Display for CheckRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.modifier < 0 { '-' } else { '+' };
        write!(
            f,
            "rolled {} {sign} {} = {} => {}",
            self.roll,
            i64::from(self.modifier).abs(),
            self.total,
            if self.success { "success" } else { "failure" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> CharacterState {
        CharacterState::from_json(
            r#"{"name": "Aria", "max_hp": 10, "abilities": {"str": 16, "cha": 8}, "proficiency_bonus": 3}"#,
        )
        .unwrap()
    }

    #[test]
    fn draws_one_d20() {
        let check = AbilityCheck::new(Ability::Strength, 12);
        let mut rsg = Rsg::new(42);
        let mut mirror = Rsg::new(42);
        let result = check.roll(&hero(), &mut rsg);
        assert_eq!(rsg.draws(), 1);
        assert_eq!(result.roll, mirror.roll(20));
        assert_eq!(result.modifier, 3);
        assert_eq!(result.total, result.roll as i32 + 3);
        assert_eq!(result.success, result.total >= 12);
    }

    #[test]
    fn proficiency_adds_bonus() {
        let mut check = AbilityCheck::new(Ability::Charisma, 10);
        assert_eq!(check.modifier(&hero()), -1);
        check.proficient = true;
        assert_eq!(check.modifier(&hero()), 2);
    }

    #[test]
    fn display() {
        let roll = CheckRoll {
            roll: 14,
            modifier: -1,
            total: 13,
            dc: 15,
            success: false,
        };
        assert_eq!(roll.to_string(), "rolled 14 - 1 = 13 => failure");
        let roll = CheckRoll {
            roll: 9,
            modifier: 3,
            total: 12,
            dc: 12,
            success: true,
        };
        assert_eq!(roll.to_string(), "rolled 9 + 3 = 12 => success");
    }
}
