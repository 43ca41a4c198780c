//! End-to-end runs of the `rosterforge` binary.

use std::io::Write;
use std::process::{Command, Output};

use rosterforge_test::sample_roster;
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn rosterforge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rosterforge"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn sample_file() -> NamedTempFile {
    write_temp(".json", &sample_roster().to_json_string().unwrap())
}

#[test]
fn test_score_prints_total() {
    let roster = sample_file();
    let output = rosterforge(&["score", roster.path().to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "score: -51100hard/-1medium/-100000027600soft");
}

#[test]
fn test_explain_lists_matching_constraints() {
    let roster = sample_file();
    let output = rosterforge(&["score", roster.path().to_str().unwrap(), "--explain"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("constraints:"));
    assert!(stdout.contains("Required skill for a shift"));
    assert!(stdout.contains("-30000hard/0medium/0soft"));
}

#[test]
fn test_indictments_lists_worst_facts() {
    let roster = sample_file();
    let output = rosterforge(&["score", roster.path().to_str().unwrap(), "--indictments", "2"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("indictments:"));
    assert!(!stdout.contains("constraints:"));
    assert!(stdout.contains("matches"));
}

#[test]
fn test_config_file_replaces_weights() {
    let mut toml = String::from("week_start_day = \"monday\"\n\n[weights]\n");
    for key in rosterforge::ConstraintKey::ALL {
        toml.push_str(&format!("{} = \"0hard/0medium/0soft\"\n", key.config_key()));
    }
    let config = write_temp(".toml", &toml);
    let roster = sample_file();

    let output = rosterforge(&[
        "score",
        roster.path().to_str().unwrap(),
        "--config",
        config.path().to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "score: 0hard/0medium/0soft");
}

#[test]
fn test_invalid_roster_exits_with_one() {
    let mut roster = sample_roster();
    roster.shifts[0].end = roster.shifts[0].start;
    let file = write_temp(".json", &roster.to_json_string().unwrap());

    let output = rosterforge(&["score", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid snapshot"));
}

#[test]
fn test_malformed_json_exits_with_one() {
    let file = write_temp(".json", "{ not json");
    let output = rosterforge(&["score", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_file_exits_with_one() {
    let output = rosterforge(&["score", "/nonexistent/roster.json"]);
    assert_eq!(output.status.code(), Some(1));
}
