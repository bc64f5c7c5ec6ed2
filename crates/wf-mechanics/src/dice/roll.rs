//! Dice roll results.

use super::Die;

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
}

/// The result of rolling a [`DiceExpr`](super::DiceExpr).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollResult {
    /// Individual die results in the order they were drawn.
    pub dice: Vec<DieResult>,
    /// Flat bonus added after summing the dice (already resolved).
    pub bonus: i32,
    /// Whether the expression negates its total.
    pub negated: bool,
}

impl RollResult {
    /// Sum of the dice plus the bonus, ignoring negation.
    pub fn magnitude(&self) -> i32 {
        let dice: i64 = self.dice.iter().map(|d| i64::from(d.value)).sum();
        clamp_i32(dice + i64::from(self.bonus))
    }

    /// Signed total: the magnitude, negated when the expression asks for it.
    pub fn total(&self) -> i32 {
        if self.negated {
            self.magnitude().saturating_neg()
        } else {
            self.magnitude()
        }
    }

    /// The individual die values.
    pub fn values(&self) -> Vec<u32> {
        self.dice.iter().map(|d| d.value).collect()
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.value.to_string()).collect();
        write!(f, "[{}]", values.join(", "))?;
        match self.bonus {
            0 => {}
            b if b > 0 => write!(f, " + {b}")?,
            b => write!(f, " - {}", i64::from(b).abs())?,
        }
        write!(f, " = {}", self.total())
    }
}
