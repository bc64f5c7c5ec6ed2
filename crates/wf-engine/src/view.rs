//! Display-ready projection of the session state.
//!
//! The JSON form of [`ViewSnapshot`] is the wire contract with the
//! presentation layer: `title` and `log` are omitted when absent, every
//! other field is always present, and readers ignore fields they do not
//! know.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wf_campaign::Node;
use wf_mechanics::CharacterState;

/// Title of the synthetic view shown when a payload cannot be read.
pub const ERROR_VIEW_TITLE: &str = "Engine Error";

/// A choice the player can currently take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    /// Choice id to pass back to `choose`.
    pub id: String,
    /// Display label.
    pub label: String,
}

/// The character line shown alongside the narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSummary {
    /// Character name.
    pub name: String,
    /// Character level (0..=255).
    pub level: u8,
    /// Current hit points.
    pub current_hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
}

impl CharacterSummary {
    /// Summary used when no character can be shown.
    pub fn placeholder() -> Self {
        Self {
            name: "Unknown".to_string(),
            level: 0,
            current_hp: 0,
            max_hp: 0,
        }
    }
}

/// A read-only snapshot of what the player should see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    /// Node title, if the node has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Narrative paragraphs.
    pub text: Vec<String>,
    /// Visible choices only.
    pub choices: Vec<ChoiceView>,
    /// Character summary.
    pub character_summary: CharacterSummary,
    /// Log text from the most recent choice, if it produced any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

/// A view payload that does not match the wire shape.
#[derive(Debug, Error)]
#[error("malformed view payload: {0}")]
pub struct SerializationError(#[from] serde_json::Error);

/// Build the view for `node`. Hidden choices are left out.
pub fn project(node: &Node, character: &CharacterState, last_log: Option<&str>) -> ViewSnapshot {
    let hp = character.hp();
    ViewSnapshot {
        title: node.title.clone(),
        text: node.text.clone(),
        choices: node
            .visible_choices(character)
            .map(|choice| ChoiceView {
                id: choice.id.clone(),
                label: choice.label.clone(),
            })
            .collect(),
        character_summary: CharacterSummary {
            name: character.name().to_string(),
            level: character.level(),
            current_hp: hp.current(),
            max_hp: hp.max(),
        },
        log: last_log.map(str::to_string),
    }
}

impl ViewSnapshot {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a payload, ignoring unknown fields.
    pub fn from_json(text: &str) -> Result<Self, SerializationError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a payload, substituting [`ViewSnapshot::error_view`] when it
    /// does not match the wire shape.
    pub fn parse_or_error_view(text: &str) -> Self {
        match Self::from_json(text) {
            Ok(view) => view,
            Err(err) => {
                tracing::warn!(error = %err, "substituting error view");
                Self::error_view(&err.to_string())
            }
        }
    }

    /// The synthetic view shown in place of an unreadable payload.
    pub fn error_view(diagnostic: &str) -> Self {
        Self {
            title: Some(ERROR_VIEW_TITLE.to_string()),
            text: vec![
                "The adventure could not be displayed.".to_string(),
                diagnostic.to_string(),
            ],
            choices: Vec::new(),
            character_summary: CharacterSummary::placeholder(),
            log: None,
        }
    }

    /// Whether the player has nothing left to choose.
    pub fn is_ending(&self) -> bool {
        self.choices.is_empty()
    }
}
