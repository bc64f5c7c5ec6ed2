//! Dice expressions like `2d6`, `-1d6`, `1d8+2`, or `1d20+dex`.
//!
//! Grammar: `[-]NdS[(+|-)M]`. `N` defaults to 1 and must be 1..=100, `S`
//! must be at least 2, and `M` is either an integer or a stat name that is
//! resolved when the expression is rolled. A leading `-` negates the total,
//! which is how campaigns spell damage.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::roll::{DieResult, RollResult};
use super::Die;
use crate::error::{MechError, MechResult};
use crate::rng::Rsg;

/// Largest number of dice a single expression may roll.
pub const MAX_DICE: u32 = 100;

/// The flat part of a dice expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bonus {
    /// A fixed integer bonus (may be negative).
    Flat(i32),
    /// A stat looked up at roll time, e.g. `str` or `prof`.
    Stat {
        /// Lowercase stat name.
        name: String,
        /// Whether the stat is subtracted rather than added.
        negative: bool,
    },
}

impl Bonus {
    fn parse(raw: &str, expr: &str) -> MechResult<Self> {
        let (negative, term) = match raw.split_at(1) {
            ("+", rest) => (false, rest.trim()),
            ("-", rest) => (true, rest.trim()),
            _ => return Err(invalid(expr, "bonus must start with '+' or '-'")),
        };
        if term.is_empty() {
            return Err(invalid(expr, "missing bonus after sign"));
        }
        if let Ok(n) = term.parse::<i64>() {
            let signed = if negative { n.checked_neg() } else { Some(n) };
            return signed
                .and_then(|n| i32::try_from(n).ok())
                .map(Self::Flat)
                .ok_or_else(|| invalid(expr, "bonus out of range"));
        }
        let starts_like_name = term
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if starts_like_name && term.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Ok(Self::Stat {
                name: term.to_string(),
                negative,
            });
        }
        Err(invalid(expr, "bonus must be a number or a stat name"))
    }

    fn resolve(&self, lookup: &impl Fn(&str) -> i32) -> i32 {
        match self {
            Self::Flat(n) => *n,
            Self::Stat { name, negative } => {
                let value = lookup(name);
                if *negative {
                    value.saturating_neg()
                } else {
                    value
                }
            }
        }
    }
}

/// A parsed dice expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpr {
    /// Number of dice to roll.
    pub count: u32,
    /// The die rolled `count` times.
    pub die: Die,
    /// Optional flat or stat bonus added to the dice.
    pub bonus: Option<Bonus>,
    /// Whether the total is negated.
    pub negate: bool,
}

impl DiceExpr {
    /// An expression rolling `count` dice of the given type with no bonus.
    pub fn new(count: u32, die: Die) -> Self {
        Self {
            count,
            die,
            bonus: None,
            negate: false,
        }
    }

    /// Add a flat bonus.
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = Some(Bonus::Flat(bonus));
        self
    }

    /// Negate the total of this expression.
    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Roll the dice in order, drawing one value per die, then resolve the
    /// bonus through `lookup` (stat name → value).
    pub fn roll(&self, rsg: &mut Rsg, lookup: impl Fn(&str) -> i32) -> RollResult {
        let dice = (0..self.count)
            .map(|_| DieResult {
                die: self.die,
                value: rsg.roll(self.die.sides()),
            })
            .collect();
        let bonus = self.bonus.as_ref().map_or(0, |b| b.resolve(&lookup));
        RollResult {
            dice,
            bonus,
            negated: self.negate,
        }
    }

    /// Roll with stat bonuses treated as zero.
    pub fn roll_flat(&self, rsg: &mut Rsg) -> RollResult {
        self.roll(rsg, |_| 0)
    }
}

fn invalid(expr: &str, reason: &str) -> MechError {
    MechError::InvalidDice {
        expr: expr.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for DiceExpr {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        let expr = s.trim();
        let (negate, body) = match expr.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, expr),
        };
        let body = body.to_ascii_lowercase();

        let (count_str, rest) = body
            .split_once('d')
            .ok_or_else(|| invalid(expr, "expected NdS"))?;
        let count = if count_str.trim().is_empty() {
            1
        } else {
            count_str
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid(expr, "dice count is not a number"))?
        };
        if !(1..=MAX_DICE).contains(&count) {
            return Err(invalid(expr, "dice count must be between 1 and 100"));
        }

        let (sides_str, bonus_str) = match rest.find(['+', '-']) {
            Some(i) => (&rest[..i], Some(&rest[i..])),
            None => (rest, None),
        };
        let sides = sides_str
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid(expr, "die size is not a number"))?;
        if sides < 2 {
            return Err(invalid(expr, "a die needs at least two sides"));
        }

        let bonus = bonus_str.map(|b| Bonus::parse(b, expr)).transpose()?;

        Ok(Self {
            count,
            die: Die::from_sides(sides),
            bonus,
            negate,
        })
    }
}

impl TryFrom<String> for DiceExpr {
    type Error = MechError;

    fn try_from(value: String) -> MechResult<Self> {
        value.parse()
    }
}

impl From<DiceExpr> for String {
    fn from(expr: DiceExpr) -> Self {
        expr.to_string()
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negate {
            write!(f, "-")?;
        }
        write!(f, "{}{}", self.count, self.die)?;
        match &self.bonus {
            None => Ok(()),
            Some(Bonus::Flat(n)) if *n >= 0 => write!(f, "+{n}"),
            Some(Bonus::Flat(n)) => write!(f, "{n}"),
            Some(Bonus::Stat { name, negative }) => {
                write!(f, "{}{name}", if *negative { '-' } else { '+' })
            }
        }
    }
}
