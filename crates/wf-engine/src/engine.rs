//! The session state machine.
//!
//! An [`Engine`] is parked at one node. [`Engine::choose`] validates a
//! visible choice, runs its effects, moves to the destination, and runs
//! arrival effects there. All of that happens on staged copies that are
//! committed together, so a failed `choose` changes nothing.

use wf_campaign::{Campaign, Choice, Node};
use wf_mechanics::{CharacterState, Rsg};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::journal::{Journal, JournalEntry};
use crate::resolve::{Resolution, Resolver};
use crate::view::{ViewSnapshot, project};

/// A single play session.
#[derive(Debug, Clone)]
pub struct Engine {
    campaign: Campaign,
    character: CharacterState,
    rsg: Rsg,
    config: EngineConfig,
    current: String,
    journal: Journal,
    last_log: Option<String>,
    turn: u64,
}

impl Engine {
    /// Start a session at the campaign's start node, running its arrival
    /// effects.
    pub fn new(
        campaign: Campaign,
        character: CharacterState,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        let rsg = Rsg::new(config.seed);
        let start = campaign.start_node().id.clone();
        let opening = Resolver::new(&campaign, &config, character, rsg).arrive(&start)?;

        let mut journal = Journal::with_capacity(config.log_history);
        if let Some(text) = &opening.log {
            journal.append(JournalEntry::Opening {
                node: opening.node.clone(),
                text: text.clone(),
            });
        }

        tracing::info!(
            campaign = %campaign.id(),
            character = %opening.character.name(),
            seed = config.seed,
            node = %opening.node,
            "session started"
        );

        let Resolution {
            character,
            rsg,
            node,
            log,
        } = opening;
        Ok(Self {
            campaign,
            character,
            rsg,
            config,
            current: node,
            journal,
            last_log: log,
            turn: 0,
        })
    }

    /// Parse and validate both definitions, then start a session.
    pub fn from_json(
        campaign_json: &str,
        character_json: &str,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        let campaign = Campaign::from_json(campaign_json)?;
        let character = CharacterState::from_json(character_json)?;
        Self::new(campaign, character, config)
    }

    /// Project the current state. Never changes anything.
    pub fn current_view(&self) -> ViewSnapshot {
        project(self.current_node(), &self.character, self.last_log.as_deref())
    }

    /// Take a visible choice at the current node.
    ///
    /// Fails with [`EngineError::InvalidChoice`] if `choice_id` is unknown or
    /// hidden, and with [`EngineError::RedirectLoop`] if arrival effects keep
    /// redirecting. Either way the session is left exactly as it was.
    pub fn choose(&mut self, choice_id: &str) -> EngineResult<()> {
        let node = self.current_node();
        let Some(choice) = node
            .visible_choices(&self.character)
            .find(|c| c.id == choice_id)
        else {
            tracing::warn!(node = %self.current, choice = %choice_id, "rejected choice");
            return Err(EngineError::InvalidChoice {
                node: self.current.clone(),
                choice: choice_id.to_string(),
            });
        };

        let mut resolver = Resolver::new(
            &self.campaign,
            &self.config,
            self.character.clone(),
            self.rsg.clone(),
        );
        let redirect = resolver.apply_effects(&choice.effects)?;
        let destination = redirect.unwrap_or_else(|| choice.target.clone());
        let outcome = resolver.arrive(&destination)?;

        self.turn += 1;
        tracing::debug!(
            turn = self.turn,
            from = %self.current,
            choice = %choice_id,
            to = %outcome.node,
            "transition"
        );
        if let Some(text) = &outcome.log {
            self.journal.append(JournalEntry::Turn {
                turn: self.turn,
                from: self.current.clone(),
                choice: choice_id.to_string(),
                to: outcome.node.clone(),
                text: text.clone(),
            });
        }
        self.character = outcome.character;
        self.rsg = outcome.rsg;
        self.current = outcome.node;
        self.last_log = outcome.log;
        Ok(())
    }

    /// Choices visible at the current node, in declared order.
    pub fn visible_choices(&self) -> Vec<&Choice> {
        self.current_node()
            .visible_choices(&self.character)
            .collect()
    }

    /// The node the session is parked at.
    pub fn current_node(&self) -> &Node {
        // `current` only ever holds ids resolved against the campaign
        self.campaign
            .node(&self.current)
            .unwrap_or_else(|| self.campaign.start_node())
    }

    /// Id of the node the session is parked at.
    pub fn current_node_id(&self) -> &str {
        &self.current
    }

    /// The player character.
    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    /// The campaign being played.
    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    /// The random sequence.
    pub fn rsg(&self) -> &Rsg {
        &self.rsg
    }

    /// The session journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Log text from the most recent transition.
    pub fn last_log(&self) -> Option<&str> {
        self.last_log.as_deref()
    }

    /// Number of successful choices so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether no choice is visible at the current node.
    pub fn is_ended(&self) -> bool {
        self.current_node().is_ending(&self.character)
    }
}
