use std::path::Path;

use wf_engine::{Engine, EngineConfig};

pub fn run(
    campaign_path: &Path,
    character_path: &Path,
    choices: &[String],
    config: EngineConfig,
) -> Result<(), String> {
    let campaign = super::read_file(campaign_path)?;
    let character = super::read_file(character_path)?;
    let mut engine = Engine::from_json(&campaign, &character, config).map_err(|e| e.to_string())?;

    print_view(&engine)?;
    for id in choices {
        engine.choose(id).map_err(|e| e.to_string())?;
        print_view(&engine)?;
    }
    Ok(())
}

fn print_view(engine: &Engine) -> Result<(), String> {
    let json = engine.current_view().to_json().map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
