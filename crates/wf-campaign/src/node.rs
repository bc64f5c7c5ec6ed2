//! Nodes and the choices leading out of them.

use serde::{Deserialize, Serialize};
use wf_mechanics::CharacterState;

use crate::condition::Condition;
use crate::effect::Effect;

/// A player-selectable transition out of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Identifier, unique within the owning node.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Node reached when no effect redirects.
    #[serde(alias = "next")]
    pub target: String,
    /// Precondition controlling visibility.
    #[serde(default, alias = "precondition", skip_serializing_if = "Option::is_none")]
    pub requires: Option<Condition>,
    /// Effects applied when the choice is taken, before moving.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
}

impl Choice {
    /// Whether the precondition passes (or there is none).
    pub fn is_available(&self, character: &CharacterState) -> bool {
        self.requires
            .as_ref()
            .is_none_or(|condition| condition.evaluate(character))
    }
}

/// A unit of narrative content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: String,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Narrative paragraphs in display order.
    #[serde(default)]
    pub text: Vec<String>,
    /// Outgoing choices in display order.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Effects applied once on every arrival.
    #[serde(default, alias = "effects", skip_serializing_if = "Vec::is_empty")]
    pub on_enter: Vec<Effect>,
}

impl Node {
    /// Choices whose precondition currently passes, in declared order.
    pub fn visible_choices<'a>(
        &'a self,
        character: &'a CharacterState,
    ) -> impl Iterator<Item = &'a Choice> + 'a {
        self.choices
            .iter()
            .filter(move |choice| choice.is_available(character))
    }

    /// Look up a choice by id, visible or not.
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id == id)
    }

    /// Whether no choice is currently visible.
    pub fn is_ending(&self, character: &CharacterState) -> bool {
        self.visible_choices(character).next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> CharacterState {
        CharacterState::from_json(r#"{"name": "Aria", "max_hp": 10, "flags": ["key"]}"#).unwrap()
    }

    fn gate() -> Node {
        serde_json::from_str(
            r#"{
                "id": "gate",
                "title": "The Gate",
                "text": ["A locked gate."],
                "choices": [
                    {"id": "unlock", "label": "Unlock it", "next": "yard",
                     "precondition": {"kind": "has_flag", "flag": "key"}},
                    {"id": "climb", "label": "Climb", "target": "yard",
                     "requires": {"kind": "stat_at_least", "stat": "dex", "value": 14}},
                    {"id": "leave", "label": "Leave", "target": "road"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn aliases_are_accepted() {
        let node = gate();
        assert_eq!(node.choice("unlock").map(|c| c.target.as_str()), Some("yard"));
        assert!(node.choice("unlock").is_some_and(|c| c.requires.is_some()));
        assert!(node.on_enter.is_empty());
    }

    #[test]
    fn filters_hidden_choices() {
        let node = gate();
        let hero = hero();
        let ids: Vec<&str> = node
            .visible_choices(&hero)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["unlock", "leave"]);
    }

    #[test]
    fn ending_has_no_visible_choices() {
        let node: Node = serde_json::from_str(r#"{"id": "end", "text": ["Fin."]}"#).unwrap();
        assert!(node.is_ending(&hero()));
        assert!(node.title.is_none());
        assert!(!gate().is_ending(&hero()));
    }
}
