//! The validated campaign graph.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use wf_mechanics::MonsterStats;

use crate::error::SchemaResult;
use crate::node::Node;
use crate::validate::validate;

/// A campaign as written in JSON, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDefinition {
    /// Campaign identifier.
    #[serde(default)]
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Node where play begins.
    #[serde(rename = "startNodeId", alias = "start_node_id")]
    pub start_node_id: String,
    /// Campaign-specific monsters keyed by id.
    #[serde(default)]
    pub bestiary: BTreeMap<String, MonsterStats>,
    /// All nodes.
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// An immutable, validated campaign.
#[derive(Debug, Clone)]
pub struct Campaign {
    id: String,
    title: String,
    start: usize,
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    bestiary: BTreeMap<String, MonsterStats>,
}

impl Campaign {
    /// Parse and validate a campaign from JSON.
    pub fn from_json(text: &str) -> SchemaResult<Self> {
        let def: CampaignDefinition = serde_json::from_str(text)?;
        Self::load(def)
    }

    /// Validate a parsed definition.
    pub fn load(def: CampaignDefinition) -> SchemaResult<Self> {
        let index = validate(&def)?;
        // validate() guarantees the start node is indexed
        let start = index.get(&def.start_node_id).copied().unwrap_or_default();
        tracing::debug!(
            campaign = %def.id,
            nodes = def.nodes.len(),
            start = %def.start_node_id,
            "campaign loaded"
        );
        Ok(Self {
            id: def.id,
            title: def.title,
            start,
            nodes: def.nodes,
            index,
            bestiary: def.bestiary,
        })
    }

    /// Campaign identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// The node where play begins.
    pub fn start_node(&self) -> &Node {
        &self.nodes[self.start]
    }

    /// All nodes in declared order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Stats for a monster, from the bestiary or the built-ins.
    pub fn monster(&self, id: &str) -> Option<MonsterStats> {
        self.bestiary
            .get(id)
            .cloned()
            .or_else(|| MonsterStats::builtin(id))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of choices across all nodes.
    pub fn choice_count(&self) -> usize {
        self.nodes.iter().map(|n| n.choices.len()).sum()
    }
}
