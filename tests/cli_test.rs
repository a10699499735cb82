//! End-to-end tests for the `aiq` binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn aiq(settings: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aiq"))
        .args(args)
        .arg("--settings")
        .arg(settings)
        .env_remove("AIQ_SETTINGS")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/feed.json")
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_score_json() {
    let dir = tempfile::tempdir().unwrap();
    let title = "A".repeat(30);
    let output = aiq(
        &dir.path().join("settings.toml"),
        &[
            "score",
            "--title",
            &title,
            "--body",
            "This benchmark shows SOTA throughput with 3 references",
            "--tag",
            "--links",
            "3",
            "--replies",
            "20",
            "--approvals",
            "100",
            "--explain",
            "--json",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["score"], 69);
    assert_eq!(parsed["decision"], "visible");
    assert_eq!(parsed["badge"], "AIQ 69");
    assert_eq!(parsed["breakdown"]["substance"], 15.0);
}

#[test]
fn test_score_from_record_file() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("item.json");
    std::fs::write(&record, r#"{"title": "Shocking", "authorHandle": "u/Erin"}"#).unwrap();

    let output = aiq(
        &dir.path().join("settings.toml"),
        &["score", "--record", record.to_str().unwrap(), "--viewer", "erin", "--json"],
    );
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["isOwn"], true);
    assert_eq!(parsed["decision"], "visible");
    assert!(parsed.get("breakdown").is_none());
}

#[test]
fn test_readability() {
    let dir = tempfile::tempdir().unwrap();
    let output = aiq(&dir.path().join("settings.toml"), &["readability", "The cat sat."]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("119.19"));
}

#[test]
fn test_scan_snapshot_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = aiq(
        &dir.path().join("settings.toml"),
        &["scan", &fixture(), "--format", "json"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["viewer"], "alice");
    assert_eq!(parsed["summary"]["total"], 4);
    assert_eq!(parsed["summary"]["suppressed"], 2);
    assert_eq!(parsed["unreadable"], 1);
}

#[test]
fn test_scan_text_honours_settings() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(&settings, "dimInsteadOfHide = true\n").unwrap();

    let output = aiq(&settings, &["scan", &fixture()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("t3_low"));
    assert!(text.contains("2 shown, 2 dimmed, 0 hidden (1 yours)"));
}

#[test]
fn test_scan_missing_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let output = aiq(
        &dir.path().join("settings.toml"),
        &["scan", missing.to_str().unwrap()],
    );
    assert!(!output.status.success());
}

#[test]
fn test_config_init_set_show() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("aiq").join("settings.toml");

    assert!(aiq(&settings, &["config", "init"]).status.success());
    let template = std::fs::read_to_string(&settings).unwrap();
    assert!(template.contains("threshold = 60"));

    let output = aiq(&settings, &["config", "set", "threshold", "150"]);
    assert!(output.status.success());
    let saved = std::fs::read_to_string(&settings).unwrap();
    assert!(saved.contains("threshold = 100"));

    let output = aiq(&settings, &["config", "show"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("100"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    let output = aiq(&settings, &["config", "set", "colour", "blue"]);
    assert!(!output.status.success());
    assert!(!settings.exists());
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = aiq(&dir.path().join("settings.toml"), &["version"]);
    assert!(stdout(&output).starts_with("aiq "));
}
