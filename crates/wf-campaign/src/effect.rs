//! Effects applied on arrival at a node or when a choice is taken.

use serde::{Deserialize, Serialize};
use wf_mechanics::{Ability, DiceExpr, Stat};

use crate::condition::Condition;

/// How much an `adjust` effect changes a stat by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AmountRepr", into = "AmountRepr")]
pub enum Amount {
    /// A fixed delta.
    Fixed(i32),
    /// A dice expression rolled when the effect runs.
    Roll(DiceExpr),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Int(i64),
    Text(String),
}

impl TryFrom<AmountRepr> for Amount {
    type Error = String;

    fn try_from(repr: AmountRepr) -> Result<Self, String> {
        match repr {
            AmountRepr::Int(n) => i32::try_from(n)
                .map(Amount::Fixed)
                .map_err(|_| format!("amount {n} is out of range")),
            AmountRepr::Text(text) => match text.trim().parse::<i32>() {
                Ok(n) => Ok(Amount::Fixed(n)),
                Err(_) => text.parse().map(Amount::Roll).map_err(|e| e.to_string()),
            },
        }
    }
}

impl From<Amount> for AmountRepr {
    fn from(amount: Amount) -> Self {
        match amount {
            Amount::Fixed(n) => AmountRepr::Int(i64::from(n)),
            Amount::Roll(expr) => AmountRepr::Text(expr.to_string()),
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Fixed(n) => write!(f, "{n}"),
            Amount::Roll(expr) => write!(f, "{expr}"),
        }
    }
}

fn default_count() -> u32 {
    1
}

/// A reference to monsters fighting in an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRef {
    /// Bestiary or built-in monster id.
    #[serde(rename = "ref")]
    pub monster: String,
    /// How many of this monster join the fight, 1 to 255.
    #[serde(default = "default_count")]
    pub count: u32,
}

/// A consequence attached to a node arrival or a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Change a stat by a fixed or rolled amount.
    Adjust {
        /// Stat to change.
        stat: Stat,
        /// Delta to apply.
        amount: Amount,
    },
    /// Add a line to the log.
    Log {
        /// Log text.
        text: String,
    },
    /// Set a flag on the character.
    SetFlag {
        /// Flag name.
        flag: String,
    },
    /// Clear a flag on the character.
    ClearFlag {
        /// Flag name.
        flag: String,
    },
    /// Roll an ability check and redirect on the outcome.
    Check {
        /// Ability tested.
        ability: Ability,
        /// Difficulty class.
        dc: i32,
        /// Whether the proficiency bonus applies.
        #[serde(default)]
        proficient: bool,
        /// Redirect on success.
        #[serde(default)]
        success: Option<String>,
        /// Redirect on failure.
        #[serde(default)]
        failure: Option<String>,
        /// Flavour line logged before the roll.
        #[serde(default)]
        description: Option<String>,
    },
    /// Redirect based on the current character state.
    Branch {
        /// Condition to test.
        when: Condition,
        /// Redirect when the condition holds.
        #[serde(default)]
        then: Option<String>,
        /// Redirect when it does not.
        #[serde(default)]
        otherwise: Option<String>,
    },
    /// Fight monsters and redirect on the outcome.
    Encounter {
        /// Monsters in the fight, in attack order.
        monsters: Vec<MonsterRef>,
        /// Redirect on victory.
        #[serde(default)]
        victory: Option<String>,
        /// Redirect on defeat.
        #[serde(default)]
        defeat: Option<String>,
    },
}

impl Effect {
    /// Every node id this effect may redirect to.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        let (a, b) = match self {
            Effect::Check {
                success, failure, ..
            } => (success.as_deref(), failure.as_deref()),
            Effect::Branch {
                then, otherwise, ..
            } => (then.as_deref(), otherwise.as_deref()),
            Effect::Encounter {
                victory, defeat, ..
            } => (victory.as_deref(), defeat.as_deref()),
            Effect::Adjust { .. }
            | Effect::Log { .. }
            | Effect::SetFlag { .. }
            | Effect::ClearFlag { .. } => (None, None),
        };
        a.into_iter().chain(b)
    }

    /// Whether resolving this effect draws from the random sequence.
    pub fn is_random(&self) -> bool {
        match self {
            Effect::Adjust { amount, .. } => matches!(amount, Amount::Roll(_)),
            Effect::Check { .. } | Effect::Encounter { .. } => true,
            Effect::Log { .. }
            | Effect::SetFlag { .. }
            | Effect::ClearFlag { .. }
            | Effect::Branch { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Effect {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn adjust_amounts() {
        let fixed = parse(r#"{"kind": "adjust", "stat": "gold", "amount": 5}"#);
        assert_eq!(
            fixed,
            Effect::Adjust {
                stat: Stat::Attribute("gold".into()),
                amount: Amount::Fixed(5)
            }
        );
        let rolled = parse(r#"{"kind": "adjust", "stat": "hp", "amount": "-1d6"}"#);
        let Effect::Adjust { amount, .. } = &rolled else {
            panic!("expected adjust");
        };
        assert_eq!(amount.to_string(), "-1d6");
        assert!(rolled.is_random());

        let textual = parse(r#"{"kind": "adjust", "stat": "hp", "amount": "-3"}"#);
        assert!(!textual.is_random());
    }

    #[test]
    fn rejects_bad_amounts() {
        for bad in [
            r#"{"kind": "adjust", "stat": "hp", "amount": "lots"}"#,
            r#"{"kind": "adjust", "stat": "hp", "amount": 99999999999}"#,
            r#"{"kind": "adjust", "stat": "hp", "amount": true}"#,
        ] {
            assert!(serde_json::from_str::<Effect>(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn check_with_defaults() {
        let effect = parse(r#"{"kind": "check", "ability": "DEX", "dc": 12, "success": "ledge"}"#);
        assert_eq!(
            effect,
            Effect::Check {
                ability: Ability::Dexterity,
                dc: 12,
                proficient: false,
                success: Some("ledge".into()),
                failure: None,
                description: None,
            }
        );
        assert_eq!(effect.targets().collect::<Vec<_>>(), vec!["ledge"]);
    }

    #[test]
    fn encounter_targets() {
        let effect = parse(
            r#"{"kind": "encounter", "monsters": [{"ref": "srd_goblin", "count": 2}],
                "victory": "loot", "defeat": "grave"}"#,
        );
        assert_eq!(effect.targets().collect::<Vec<_>>(), vec!["loot", "grave"]);
        let Effect::Encounter { monsters, .. } = effect else {
            panic!("expected encounter");
        };
        assert_eq!(monsters[0].monster, "srd_goblin");
        assert_eq!(monsters[0].count, 2);
    }

    #[test]
    fn log_has_no_targets() {
        let effect = parse(r#"{"kind": "log", "text": "The wind howls."}"#);
        assert_eq!(effect.targets().count(), 0);
        assert!(!effect.is_random());
    }
}
