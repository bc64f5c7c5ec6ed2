use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use wf_engine::{EngineConfig, SessionHost, ViewSnapshot};

pub fn run(campaign_path: &Path, character_path: &Path, config: EngineConfig) -> Result<(), String> {
    let campaign = super::read_file(campaign_path)?;
    let character = super::read_file(character_path)?;

    let host = SessionHost::new();
    let seed = config.seed;
    host.initialize_with(&campaign, &character, config)
        .map_err(|e| format!("failed to start session: {e}"))?;

    println!("  {} (seed {seed})", "Starting adventure".bold());
    println!("  Enter a choice number, 'journal' to review, 'quit' to exit.");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        let view = match host.current_view() {
            Ok(json) => ViewSnapshot::parse_or_error_view(&json),
            Err(e) => ViewSnapshot::error_view(&e.to_string()),
        };
        super::render_view(&view);
        if view.is_ending() {
            println!("\n[END OF ADVENTURE]");
            break;
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }
        if input.eq_ignore_ascii_case("journal") {
            let text = host
                .with_engine(|engine| engine.journal().export_text())
                .map_err(|e| e.to_string())?;
            println!("\n{text}");
            continue;
        }

        let id = match input.parse::<usize>() {
            Ok(n) if (1..=view.choices.len()).contains(&n) => view.choices[n - 1].id.clone(),
            Ok(_) => {
                println!("{}", "No such choice.".yellow());
                continue;
            }
            Err(_) => input.to_string(),
        };
        if let Err(e) = host.choose(&id) {
            println!("{}", e.to_string().yellow());
        }
    }

    host.teardown();
    Ok(())
}
