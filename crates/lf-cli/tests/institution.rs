//! Integration tests for the `institution` command.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

fn institution() -> Command {
    Command::cargo_bin("institution").unwrap()
}

#[test]
fn named_profile_markdown() {
    institution()
        .args(["Helix Labs", "--sector", "technology", "--era", "1980s", "--seed", "9"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("# Institution Profile: Helix Labs")
                .and(predicate::str::contains("## Crisis History"))
                .and(predicate::str::contains("Crisis 2:")),
        );
}

#[test]
fn seed_reproduces_profile() {
    let run = || {
        institution()
            .args(["--sector", "banking", "--era", "1920s", "--seed", "77", "--json"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn crisis_count_respected() {
    let output = institution()
        .args(["Helix Labs", "--crises", "3", "--seed", "1", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["crises"].as_array().unwrap().len(), 3);
    assert_eq!(json["name"], "Helix Labs");
    assert_eq!(json["foundingEra"], "1980s");
}

#[test]
fn ecosystem_has_three_profiles() {
    let output = institution()
        .args(["Helix Labs", "--era", "1990s", "--ecosystem", "--seed", "4", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let profiles = json.as_array().unwrap();
    assert_eq!(profiles.len(), 3);
    assert_eq!(profiles[0]["name"], "Helix Labs");
    assert_eq!(profiles[1]["crises"].as_array().unwrap().len(), 1);
    assert_eq!(profiles[2]["foundingEra"], "1970");
}

#[test]
fn ecosystem_markdown_headings() {
    institution()
        .args(["--ecosystem", "--seed", "4"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("# Technology Sector Ecosystem")
                .and(predicate::str::contains("## Primary Competitor"))
                .and(predicate::str::contains("## Partner/Supplier")),
        );
}

#[test]
fn unknown_sector_still_generates() {
    institution()
        .args(["--sector", "piracy", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Institution Profile:"));
}
