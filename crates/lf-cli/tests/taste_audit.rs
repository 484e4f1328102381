//! Integration tests for the `taste-audit` command.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RUBRIC: &str = r#"{
  "dimensions": [
    {
      "id": "competence",
      "name": "Competence",
      "description": "Characters are good at their jobs",
      "positive_pole": "Expertise shown through action",
      "negative_pole": "Skill asserted",
      "weight": 1.0,
      "positive_indicators": ["methodical procedure", "technical detail"],
      "negative_indicators": ["convenient sudden insight"]
    },
    {
      "id": "magic",
      "name": "Impossibility Logic",
      "description": "Magic has costs",
      "positive_pole": "Visible costs",
      "negative_pole": "Free magic",
      "weight": 1.0,
      "positive_indicators": ["visible costs paid"],
      "negative_indicators": ["convenient power appears", "magic without consequences"]
    }
  ],
  "scoring": {
    "interpretation": {
      "4.0+": "Strong alignment",
      "below_2.0": "Major revision needed"
    }
  }
}"#;

fn setup(text: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rubric.json"), RUBRIC).unwrap();
    fs::write(dir.path().join("draft.md"), text).unwrap();
    dir
}

fn audit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taste-audit").unwrap();
    cmd.arg(dir.path().join("draft.md"))
        .arg("--dimensions")
        .arg(dir.path().join("rubric.json"));
    cmd
}

#[test]
fn strong_text_passes() {
    let dir = setup(
        "She followed a methodical procedure, logging every technical detail before she touched the lock.",
    );
    audit(&dir)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Competence: 5/5")
                .and(predicate::str::contains("Impossibility Logic: - (not present)"))
                .and(predicate::str::contains("Strong alignment")),
        );
}

#[test]
fn weak_text_fails_with_recommendations() {
    let dir = setup(
        "A convenient power appears out of nowhere, magic without consequences, and the day is saved.",
    );
    audit(&dir)
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("[Impossibility Logic] Low score (1/5)")
                .and(predicate::str::contains("-> Aim for: Visible costs")),
        )
        .stderr(predicate::str::contains("below 2.0"));
}

#[test]
fn json_output_has_scores() {
    let dir = setup("A methodical procedure, with one convenient sudden insight.");
    let output = audit(&dir).arg("--json").output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dimensions"][0]["id"], "competence");
    assert_eq!(json["dimensions"][0]["score"], 3);
    assert_eq!(json["dimensions"][1]["score"], 0);
    assert_eq!(json["overallScore"], 3.0);
}

#[test]
fn scores_only_hides_matches() {
    let dir = setup("A methodical procedure, with one convenient sudden insight.");
    audit(&dir)
        .arg("--scores-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Competence: 3/5").and(predicate::str::contains("methodical").not()));
}

#[test]
fn missing_file_fails() {
    let dir = setup("");
    Command::cargo_bin("taste-audit")
        .unwrap()
        .arg(dir.path().join("nope.md"))
        .arg("--dimensions")
        .arg(dir.path().join("rubric.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn bundled_rubric_loads() {
    let dir = setup("Budget constraints and committee approval slowed everything; bureaucratic procedure slows action.");
    Command::cargo_bin("taste-audit")
        .unwrap()
        .arg(dir.path().join("draft.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Institutional Realism: 5/5"));
}
