//! Load-time validation of a campaign definition.
//!
//! Checks run in a fixed order and stop at the first violation.

use std::collections::{BTreeMap, HashMap, HashSet};

use wf_mechanics::MonsterStats;

use crate::campaign::CampaignDefinition;
use crate::effect::Effect;
use crate::error::{SchemaError, SchemaResult};

/// Inclusive range for a check's difficulty class.
pub(crate) const DC_RANGE: std::ops::RangeInclusive<i32> = 1..=40;

/// Inclusive range for how many of one monster an encounter may field.
pub(crate) const MONSTER_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=255;

/// Validate a definition and return the node index (id → position).
pub(crate) fn validate(def: &CampaignDefinition) -> SchemaResult<HashMap<String, usize>> {
    if def.nodes.is_empty() {
        return Err(SchemaError::NoNodes);
    }

    let mut index = HashMap::with_capacity(def.nodes.len());
    for (i, node) in def.nodes.iter().enumerate() {
        if node.id.trim().is_empty() {
            return Err(SchemaError::EmptyNodeId { index: i });
        }
        if index.insert(node.id.clone(), i).is_some() {
            return Err(SchemaError::DuplicateNode(node.id.clone()));
        }
    }

    if !index.contains_key(&def.start_node_id) {
        return Err(SchemaError::MissingStart(def.start_node_id.clone()));
    }

    for node in &def.nodes {
        let location = format!("node '{}'", node.id);
        for effect in &node.on_enter {
            check_effect(effect, &location, &index, &def.bestiary)?;
        }

        let mut seen = HashSet::new();
        for choice in &node.choices {
            if choice.id.trim().is_empty() {
                return Err(SchemaError::EmptyChoiceId {
                    node: node.id.clone(),
                });
            }
            if !seen.insert(choice.id.as_str()) {
                return Err(SchemaError::DuplicateChoice {
                    node: node.id.clone(),
                    choice: choice.id.clone(),
                });
            }
            if !index.contains_key(&choice.target) {
                return Err(SchemaError::DanglingTarget {
                    node: node.id.clone(),
                    choice: choice.id.clone(),
                    target: choice.target.clone(),
                });
            }
            let location = format!("choice '{}/{}'", node.id, choice.id);
            for effect in &choice.effects {
                check_effect(effect, &location, &index, &def.bestiary)?;
            }
        }
    }

    Ok(index)
}

fn check_effect(
    effect: &Effect,
    location: &str,
    index: &HashMap<String, usize>,
    bestiary: &BTreeMap<String, MonsterStats>,
) -> SchemaResult<()> {
    if let Some(target) = effect.targets().find(|t| !index.contains_key(*t)) {
        return Err(SchemaError::DanglingRedirect {
            location: location.to_string(),
            target: target.to_string(),
        });
    }

    let invalid = |reason: String| SchemaError::InvalidEffect {
        location: location.to_string(),
        reason,
    };

    match effect {
        Effect::Check { dc, .. } if !DC_RANGE.contains(dc) => {
            Err(invalid(format!("check DC {dc} is outside 1..=40")))
        }
        Effect::Encounter { monsters, .. } => {
            if monsters.is_empty() {
                return Err(invalid("encounter has no monsters".to_string()));
            }
            for entry in monsters {
                if !MONSTER_COUNT_RANGE.contains(&entry.count) {
                    return Err(invalid(format!(
                        "monster '{}' has count {}, outside 1..=255",
                        entry.monster, entry.count
                    )));
                }
                if !bestiary.contains_key(&entry.monster)
                    && MonsterStats::builtin(&entry.monster).is_none()
                {
                    return Err(SchemaError::UnknownMonster {
                        location: location.to_string(),
                        monster: entry.monster.clone(),
                    });
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
