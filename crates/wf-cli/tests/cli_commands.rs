//! Integration tests for the `wf-cli` binary.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn content(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../content")
        .join(rel)
}

fn redcrest() -> PathBuf {
    content("campaigns/road_to_redcrest.json")
}

fn fighter() -> PathBuf {
    content("characters/pregen_fighter.json")
}

/// Write a campaign and a character into a temp directory.
fn fixture(campaign: serde_json::Value) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let campaign_path = dir.path().join("campaign.json");
    let character_path = dir.path().join("hero.json");
    fs::write(&campaign_path, campaign.to_string()).unwrap();
    fs::write(
        &character_path,
        r#"{"name": "Brann", "level": 2, "max_hp": 10, "abilities": {"str": 14}}"#,
    )
    .unwrap();
    (dir, campaign_path, character_path)
}

fn short_campaign() -> serde_json::Value {
    serde_json::json!({
        "id": "short",
        "startNodeId": "start",
        "nodes": [
            {"id": "start", "title": "Start", "text": ["A door."],
             "choices": [{"id": "open", "label": "Open the door", "target": "end",
                          "effects": [{"kind": "log", "text": "It creaks."}]}]},
            {"id": "end", "title": "End", "text": ["Daylight."]}
        ]
    })
}

fn wf() -> Command {
    let mut cmd = Command::cargo_bin("wf").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_bundled_campaign() {
    wf().arg("check")
        .arg(redcrest())
        .assert()
        .success()
        .stdout(predicate::str::contains("ok:"))
        .stdout(predicate::str::contains("12 nodes, 16 choices"))
        .stdout(predicate::str::contains("forest_edge"));
}

#[test]
fn check_validates_character() {
    wf().arg("check")
        .arg(redcrest())
        .arg("--character")
        .arg(fighter())
        .assert()
        .success()
        .stdout(predicate::str::contains("character: Aria (Lv 1) HP 12/12"));
}

#[test]
fn check_rejects_ghost_target() {
    let (_dir, campaign, _) = fixture(serde_json::json!({
        "startNodeId": "a",
        "nodes": [{"id": "a", "choices": [{"id": "go", "label": "Go", "target": "ghost"}]}]
    }));
    wf().arg("check")
        .arg(campaign)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node 'ghost'"));
}

#[test]
fn check_rejects_bad_character() {
    let (dir, campaign, _) = fixture(short_campaign());
    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"name": "X", "max_hp": 5, "current_hp": 9}"#).unwrap();
    wf().arg("check")
        .arg(campaign)
        .arg("-c")
        .arg(bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds max_hp"));
}

#[test]
fn check_missing_file() {
    wf().args(["check", "no/such/campaign.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// replay
// ---------------------------------------------------------------------------

#[test]
fn replay_prints_one_view_per_step() {
    let out = wf()
        .arg("replay")
        .arg(redcrest())
        .arg(fighter())
        .args(["--choose", "road"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["title"], "The Road to Redcrest");
    assert_eq!(first["character_summary"]["current_hp"], 12);
    assert!(first.get("log").is_none());
    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["title"], "Edge of the Thornwood");
}

#[test]
fn replay_is_deterministic() {
    let run = |seed: &str| {
        wf().arg("replay")
            .arg(redcrest())
            .arg(fighter())
            .args(["--seed", seed, "-c", "road", "-c", "charge"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run("7"), run("7"));
    assert!(!run("7").is_empty());
}

#[test]
fn replay_stops_at_invalid_choice() {
    let (_dir, campaign, character) = fixture(short_campaign());
    wf().arg("replay")
        .arg(campaign)
        .arg(character)
        .args(["--choose", "open", "--choose", "open"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"log\":\"It creaks.\""))
        .stderr(predicate::str::contains("choice 'open' is not available at node 'end'"));
}

#[test]
fn verbose_logs_to_stderr() {
    let (_dir, campaign, character) = fixture(short_campaign());
    wf().arg("--verbose")
        .arg("replay")
        .arg(campaign)
        .arg(character)
        .args(["-c", "open"])
        .assert()
        .success()
        .stderr(predicate::str::contains("session started"))
        .stderr(predicate::str::contains("transition"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_reaches_ending() {
    let (_dir, campaign, character) = fixture(short_campaign());
    wf().arg("play")
        .arg(campaign)
        .arg(character)
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Start =="))
        .stdout(predicate::str::contains("1. Open the door"))
        .stdout(predicate::str::contains("It creaks."))
        .stdout(predicate::str::contains("Brann (Lv 2) HP 10/10"))
        .stdout(predicate::str::contains("[END OF ADVENTURE]"));
}

#[test]
fn play_accepts_choice_ids_and_quits() {
    wf().arg("play")
        .arg(redcrest())
        .arg(fighter())
        .write_stdin("inn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Sleeping Boar"))
        .stdout(predicate::str::contains("[END OF ADVENTURE]").not());
}

#[test]
fn play_reports_bad_input() {
    wf().arg("play")
        .arg(redcrest())
        .arg(fighter())
        .write_stdin("9\nnowhere\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No such choice."))
        .stdout(predicate::str::contains("choice 'nowhere' is not available"));
}

#[test]
fn play_shows_journal() {
    let (_dir, campaign, character) = fixture(serde_json::json!({
        "startNodeId": "a",
        "nodes": [
            {"id": "a", "choices": [{"id": "wait", "label": "Wait", "target": "a",
                "effects": [{"kind": "log", "text": "Time passes."}]}]}
        ]
    }));
    wf().arg("play")
        .arg(campaign)
        .arg(character)
        .write_stdin("1\njournal\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session Journal"))
        .stdout(predicate::str::contains("--- Turn 1: a -[wait]-> a ---"));
}

#[test]
fn play_fails_on_invalid_campaign() {
    let (_dir, campaign, character) = fixture(serde_json::json!({"startNodeId": "x", "nodes": []}));
    wf().arg("play")
        .arg(campaign)
        .arg(character)
        .assert()
        .failure()
        .stderr(predicate::str::contains("campaign has no nodes"));
}
