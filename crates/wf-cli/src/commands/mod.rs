pub mod check;
pub mod play;
pub mod replay;

use std::fs;
use std::path::Path;

use colored::Colorize;
use wf_engine::ViewSnapshot;

/// Read a definition file, naming the path on failure.
fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Print a view the way the interactive player shows it.
fn render_view(view: &ViewSnapshot) {
    if let Some(title) = &view.title {
        println!("\n== {} ==", title.bold());
    }
    for paragraph in &view.text {
        println!("{paragraph}");
    }
    if let Some(log) = &view.log {
        println!();
        for line in log.lines() {
            println!("  {}", line.dimmed());
        }
    }
    let summary = &view.character_summary;
    println!(
        "\n{} (Lv {}) HP {}/{}",
        summary.name.cyan(),
        summary.level,
        summary.current_hp,
        summary.max_hp
    );
    for (i, choice) in view.choices.iter().enumerate() {
        println!("  {}. {}", i + 1, choice.label);
    }
}
