//! Automatic combat between the player character and a group of monsters.
//!
//! Each round the hero attacks the first monster still standing, then every
//! surviving monster attacks the hero in order. The fight ends when one side
//! is down or the round cap is reached.

use serde::{Deserialize, Serialize};

use crate::character::{Ability, CharacterState, Stat};
use crate::dice::{DiceExpr, Die};
use crate::rng::Rsg;

/// Stat block for a monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterStats {
    /// Display name.
    pub name: String,
    /// Armor class the hero's attack must meet.
    pub ac: i32,
    /// Starting hit points.
    pub hp: i32,
    /// Bonus added to the monster's attack roll.
    pub attack_bonus: i32,
    /// Damage dealt on a hit.
    pub damage: DiceExpr,
}

impl MonsterStats {
    /// The SRD goblin.
    pub fn srd_goblin() -> Self {
        Self {
            name: "Goblin".to_string(),
            ac: 15,
            hp: 7,
            attack_bonus: 4,
            damage: DiceExpr::new(1, Die::D6),
        }
    }

    /// Look up a built-in monster by id.
    pub fn builtin(id: &str) -> Option<Self> {
        match id {
            "srd_goblin" => Some(Self::srd_goblin()),
            _ => None,
        }
    }
}

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    /// Every monster was defeated.
    Victory,
    /// The hero dropped to zero hit points.
    Defeat,
    /// The round cap was reached with both sides standing.
    Stalemate,
}

/// Result of [`run_encounter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatReport {
    /// How the fight ended.
    pub outcome: CombatOutcome,
    /// Rounds fought.
    pub rounds: u32,
    /// Play-by-play log lines.
    pub log: Vec<String>,
}

struct Foe {
    stats: MonsterStats,
    hp: i32,
}

impl Foe {
    fn alive(&self) -> bool {
        self.hp > 0
    }
}

/// Run a fight to completion, damaging `hero` in place.
///
/// Draw order per round: hero attack d20, hero damage 1d8 on a hit, then for
/// each living monster in order an attack d20 and its damage dice on a hit.
pub fn run_encounter(
    hero: &mut CharacterState,
    monsters: Vec<MonsterStats>,
    rsg: &mut Rsg,
    max_rounds: u32,
) -> CombatReport {
    let mut log = Vec::new();
    let mut foes: Vec<Foe> = monsters
        .into_iter()
        .map(|stats| Foe {
            hp: stats.hp,
            stats,
        })
        .collect();

    if hero.hp().is_down() {
        log.push("You are in no state to fight.".to_string());
        return CombatReport {
            outcome: CombatOutcome::Defeat,
            rounds: 0,
            log,
        };
    }
    if !foes.iter().any(Foe::alive) {
        log.push("You won the fight!".to_string());
        return CombatReport {
            outcome: CombatOutcome::Victory,
            rounds: 0,
            log,
        };
    }

    let str_mod = hero.ability_modifier(Ability::Strength);
    let to_hit = str_mod.saturating_add(hero.proficiency_bonus());
    let weapon = DiceExpr::new(1, Die::D8);

    let mut rounds = 0;
    while rounds < max_rounds {
        rounds += 1;

        if let Some(foe) = foes.iter_mut().find(|f| f.alive()) {
            let attack = i32::try_from(rsg.roll(20)).unwrap_or(20).saturating_add(to_hit);
            if attack >= foe.stats.ac {
                let damage = weapon.roll_flat(rsg).magnitude().saturating_add(str_mod).max(1);
                foe.hp -= damage;
                log.push(format!("You hit {} for {damage} damage!", foe.stats.name));
                if !foe.alive() {
                    log.push(format!("{} is defeated.", foe.stats.name));
                }
            } else {
                log.push(format!("You miss {}.", foe.stats.name));
            }
        }

        if !foes.iter().any(Foe::alive) {
            log.push("You won the fight!".to_string());
            tracing::debug!(rounds, "combat won");
            return CombatReport {
                outcome: CombatOutcome::Victory,
                rounds,
                log,
            };
        }

        for foe in foes.iter().filter(|f| f.alive()) {
            let attack = i32::try_from(rsg.roll(20))
                .unwrap_or(20)
                .saturating_add(foe.stats.attack_bonus);
            if attack >= hero.ac() {
                let damage = foe
                    .stats
                    .damage
                    .roll(rsg, |name| hero.modifier(name))
                    .magnitude()
                    .max(1);
                hero.apply_stat_delta(&Stat::Hp, -damage);
                log.push(format!("{} hits you for {damage} damage!", foe.stats.name));
                if hero.hp().is_down() {
                    log.push("You have been defeated...".to_string());
                    tracing::debug!(rounds, "combat lost");
                    return CombatReport {
                        outcome: CombatOutcome::Defeat,
                        rounds,
                        log,
                    };
                }
            } else {
                log.push(format!("{} misses you.", foe.stats.name));
            }
        }
    }

    log.push("The fight drags on with no victor.".to_string());
    tracing::debug!(rounds, "combat stalemate");
    CombatReport {
        outcome: CombatOutcome::Stalemate,
        rounds,
        log,
    }
}
