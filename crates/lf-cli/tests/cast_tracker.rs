//! Integration tests for the `cast-tracker` command.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cast(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cast-tracker").unwrap();
    cmd.arg("--file").arg(file);
    cmd
}

fn initialised() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("cast.json");
    cast(&file).args(["init", "The Long Winter"]).assert().success();
    (dir, file)
}

// -- init --

#[test]
fn init_creates_cast_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("cast.json");
    cast(&file)
        .args(["init", "The Long Winter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created cast tracker for \"The Long Winter\""));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(json["_meta"]["project"], "The Long Winter");
    assert_eq!(json["characters"].as_array().unwrap().len(), 0);
}

#[test]
fn init_fails_if_file_exists() {
    let (_dir, file) = initialised();
    cast(&file)
        .args(["init", "Again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn commands_fail_without_cast_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("missing.json");
    for args in [&["list"][..], &["check", "Sarah"][..], &["distribution"][..], &["suggest"][..]] {
        cast(&file)
            .args(args)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not found"));
    }
}

// -- add --

#[test]
fn add_records_character_and_usage() {
    let (_dir, file) = initialised();
    cast(&file)
        .args(["add", "Sarah Chen", "--culture", "chinese-american", "--role", "detective"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added").and(predicate::str::contains("Sarah Chen")));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(json["characters"][0]["name"], "Sarah Chen");
    assert_eq!(json["characters"][0]["role"], "detective");
    assert_eq!(json["usedSurnames"][0], "Chen");
    assert_eq!(json["usedGivenNames"][0], "Sarah");
    assert_eq!(json["culturalDistribution"]["chinese-american"], 1);
}

#[test]
fn high_collision_is_refused_and_file_untouched() {
    let (_dir, file) = initialised();
    cast(&file)
        .args(["add", "Sarah Chen", "--culture", "chinese-american"])
        .assert()
        .success();
    let before = fs::read_to_string(&file).unwrap();

    cast(&file)
        .args(["add", "Sara Chen"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("High collision risk"))
        .stderr(predicate::str::contains(
            "error: validation error: \"Sara Chen\" was not added; use --force",
        ));

    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn force_adds_despite_high_collision() {
    let (_dir, file) = initialised();
    cast(&file).args(["add", "Sarah Chen"]).assert().success();
    cast(&file)
        .args(["add", "Sara Chen", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added").and(predicate::str::contains("Sara Chen")));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(json["characters"].as_array().unwrap().len(), 2);
}

#[test]
fn warning_collision_still_adds() {
    let (_dir, file) = initialised();
    cast(&file).args(["add", "Marcus Webb"]).assert().success();
    cast(&file)
        .args(["add", "Miriam Osei"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning"))
        .stdout(predicate::str::contains("Added").and(predicate::str::contains("Miriam Osei")));
}

// -- check --

#[test]
fn check_reports_high_but_exits_zero() {
    let (_dir, file) = initialised();
    cast(&file).args(["add", "Sarah Chen"]).assert().success();
    cast(&file)
        .args(["check", "Sara Chen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HIGH"));
}

#[test]
fn check_json_report() {
    let (_dir, file) = initialised();
    cast(&file).args(["add", "Sarah Chen"]).assert().success();
    let output = cast(&file)
        .args(["check", "Sarah Chen", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["hasCollision"], true);
    assert_eq!(report["severity"], "high");
}

#[test]
fn check_clean_name() {
    let (_dir, file) = initialised();
    cast(&file).args(["add", "Sarah Chen"]).assert().success();
    cast(&file)
        .args(["check", "Tobias Vance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no collisions"));
}

// -- list / distribution / suggest --

#[test]
fn list_shows_characters() {
    let (_dir, file) = initialised();
    cast(&file)
        .args(["add", "Sarah Chen", "--role", "detective"])
        .assert()
        .success();
    cast(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah Chen").and(predicate::str::contains("detective")));
}

#[test]
fn distribution_counts_cultures() {
    let (_dir, file) = initialised();
    cast(&file)
        .args(["add", "Sarah Chen", "--culture", "chinese-american"])
        .assert()
        .success();
    cast(&file)
        .args(["add", "Tobias Vance", "--culture", "anglo"])
        .assert()
        .success();
    cast(&file)
        .arg("distribution")
        .assert()
        .success()
        .stdout(predicate::str::contains("chinese-american: 1 (50.0%)"))
        .stdout(predicate::str::contains("Total characters: 2"));
}

#[test]
fn suggest_lists_available_initials() {
    let (_dir, file) = initialised();
    cast(&file).args(["add", "Sarah Chen"]).assert().success();
    let output = cast(&file).args(["suggest", "--json"]).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let available: Vec<&str> = json["availableInitials"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(!available.contains(&"S"));
    assert!(available.contains(&"A"));
}
