use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use wf_campaign::{Campaign, Effect};
use wf_mechanics::CharacterState;

pub fn run(campaign_path: &Path, character_path: Option<&Path>) -> Result<(), String> {
    let text = super::read_file(campaign_path)?;
    let campaign =
        Campaign::from_json(&text).map_err(|e| format!("{}: {e}", campaign_path.display()))?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Node", "Title", "Choices", "On arrival"]);
    for node in campaign.nodes() {
        let choices = if node.choices.is_empty() {
            "(ending)".to_string()
        } else {
            node.choices
                .iter()
                .map(|c| format!("{} -> {}", c.id, c.target))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let arrival = node
            .on_enter
            .iter()
            .map(effect_kind)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            node.id.as_str(),
            node.title.as_deref().unwrap_or("—"),
            choices.as_str(),
            if arrival.is_empty() { "—" } else { arrival.as_str() },
        ]);
    }
    println!("{table}");

    if let Some(path) = character_path {
        let text = super::read_file(path)?;
        let character =
            CharacterState::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))?;
        println!("  character: {}", character.summary());
    }

    let name = if campaign.title().is_empty() {
        campaign.id()
    } else {
        campaign.title()
    };
    println!(
        "  {} '{name}': {} nodes, {} choices",
        "ok:".green().bold(),
        campaign.node_count(),
        campaign.choice_count()
    );
    Ok(())
}

fn effect_kind(effect: &Effect) -> &'static str {
    match effect {
        Effect::Adjust { .. } => "adjust",
        Effect::Log { .. } => "log",
        Effect::SetFlag { .. } => "set_flag",
        Effect::ClearFlag { .. } => "clear_flag",
        Effect::Check { .. } => "check",
        Effect::Branch { .. } => "branch",
        Effect::Encounter { .. } => "encounter",
    }
}
