//! Staged effect resolution.
//!
//! A [`Resolver`] works on its own copies of the character and the random
//! sequence. The engine commits them only after a whole transition has
//! resolved, so a failure part way through leaves the session untouched.

use wf_campaign::{Amount, Campaign, Effect};
use wf_mechanics::{AbilityCheck, CharacterState, CombatOutcome, Rsg, Stat, run_encounter};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// Everything a finished resolution produced.
pub(crate) struct Resolution {
    pub(crate) character: CharacterState,
    pub(crate) rsg: Rsg,
    pub(crate) node: String,
    pub(crate) log: Option<String>,
}

pub(crate) struct Resolver<'a> {
    campaign: &'a Campaign,
    config: &'a EngineConfig,
    character: CharacterState,
    rsg: Rsg,
    lines: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        campaign: &'a Campaign,
        config: &'a EngineConfig,
        character: CharacterState,
        rsg: Rsg,
    ) -> Self {
        Self {
            campaign,
            config,
            character,
            rsg,
            lines: Vec::new(),
        }
    }

    /// Run effects in declared order. Returns the last redirect, if any.
    pub(crate) fn apply_effects(&mut self, effects: &[Effect]) -> EngineResult<Option<String>> {
        let mut redirect = None;
        for effect in effects {
            tracing::trace!(
                random = effect.is_random(),
                draws = self.rsg.draws(),
                "applying effect"
            );
            if let Some(target) = self.apply(effect)? {
                redirect = Some(target);
            }
        }
        Ok(redirect)
    }

    /// Move to `node_id` and run its arrival effects, following arrival
    /// redirects until a node does not redirect.
    pub(crate) fn arrive(mut self, node_id: &str) -> EngineResult<Resolution> {
        let campaign = self.campaign;
        let mut current = node_id.to_string();
        let mut redirects = 0u32;
        loop {
            let node = campaign
                .node(&current)
                .ok_or_else(|| EngineError::MissingNode(current.clone()))?;
            tracing::debug!(node = %current, "arrived");
            match self.apply_effects(&node.on_enter)? {
                Some(next) => {
                    redirects += 1;
                    if redirects > self.config.max_redirects {
                        return Err(EngineError::RedirectLoop {
                            node: node_id.to_string(),
                            limit: self.config.max_redirects,
                        });
                    }
                    tracing::debug!(from = %current, to = %next, "arrival redirect");
                    current = next;
                }
                None => break,
            }
        }
        let log = (!self.lines.is_empty()).then(|| self.lines.join("\n"));
        Ok(Resolution {
            character: self.character,
            rsg: self.rsg,
            node: current,
            log,
        })
    }

    fn apply(&mut self, effect: &Effect) -> EngineResult<Option<String>> {
        match effect {
            Effect::Adjust { stat, amount } => {
                self.adjust(stat, amount);
                Ok(None)
            }
            Effect::Log { text } => {
                self.lines.push(text.clone());
                Ok(None)
            }
            Effect::SetFlag { flag } => {
                self.character.set_flag(flag);
                tracing::debug!(%flag, "flag set");
                Ok(None)
            }
            Effect::ClearFlag { flag } => {
                self.character.clear_flag(flag);
                tracing::debug!(%flag, "flag cleared");
                Ok(None)
            }
            Effect::Check {
                ability,
                dc,
                proficient,
                success,
                failure,
                description,
            } => {
                if let Some(text) = description {
                    self.lines.push(text.clone());
                }
                let check = AbilityCheck {
                    ability: *ability,
                    dc: *dc,
                    proficient: *proficient,
                };
                let result = check.roll(&self.character, &mut self.rsg);
                self.lines
                    .push(format!("{} check (DC {dc}): {result}", ability.name()));
                Ok(if result.success {
                    success.clone()
                } else {
                    failure.clone()
                })
            }
            Effect::Branch {
                when,
                then,
                otherwise,
            } => {
                let holds = when.evaluate(&self.character);
                tracing::debug!(holds, "branch evaluated");
                Ok(if holds { then.clone() } else { otherwise.clone() })
            }
            Effect::Encounter {
                monsters,
                victory,
                defeat,
            } => {
                let mut foes = Vec::new();
                for entry in monsters {
                    let stats = self
                        .campaign
                        .monster(&entry.monster)
                        .ok_or_else(|| EngineError::UnknownMonster(entry.monster.clone()))?;
                    for n in 1..=entry.count {
                        let mut foe = stats.clone();
                        if entry.count > 1 {
                            foe.name = format!("{} {n}", stats.name);
                        }
                        foes.push(foe);
                    }
                }
                let names: Vec<&str> = foes.iter().map(|f| f.name.as_str()).collect();
                self.lines.push(format!("Combat begins: {}.", names.join(", ")));
                let report = run_encounter(
                    &mut self.character,
                    foes,
                    &mut self.rsg,
                    self.config.max_combat_rounds,
                );
                tracing::debug!(outcome = ?report.outcome, rounds = report.rounds, "encounter resolved");
                self.lines.extend(report.log);
                Ok(match report.outcome {
                    CombatOutcome::Victory => victory.clone(),
                    CombatOutcome::Defeat => defeat.clone(),
                    CombatOutcome::Stalemate => None,
                })
            }
        }
    }

    fn adjust(&mut self, stat: &Stat, amount: &Amount) {
        let (delta, detail) = match amount {
            Amount::Fixed(n) => (*n, String::new()),
            Amount::Roll(expr) => {
                let character = &self.character;
                let roll = expr.roll(&mut self.rsg, |name| character.modifier(name));
                (roll.total(), format!(" [{expr}: {roll}]"))
            }
        };
        let value = self.character.apply_stat_delta(stat, delta);
        tracing::debug!(%stat, delta, value, "adjust");
        let hp = self.character.hp();
        let line = match stat {
            Stat::Hp if delta < 0 => format!(
                "You take {} damage{detail} (HP {hp}).",
                i64::from(delta).abs()
            ),
            Stat::Hp => format!("You recover {delta} hit points{detail} (HP {hp})."),
            _ => format!("{stat} {delta:+}{detail} (now {value})."),
        };
        self.lines.push(line);
    }
}
