//! Integration tests for the msc CLI
//!
//! These tests run the binary against fixture files and check exit codes
//! and output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the msc binary built for this test run
fn msc_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_msc"))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Run msc with an explicit config so the test never picks up a stray
/// metascreens.toml from the working directory.
fn run_msc(config: &str, args: &[&str]) -> Output {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("metascreens.toml");
    std::fs::write(&config_path, config).expect("Failed to write config");

    Command::new(msc_binary())
        .arg("--config")
        .arg(&config_path)
        .args(args)
        .output()
        .expect("Failed to execute msc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_check_reports_duplicate_exit_types() {
    let table = fixture("desert.json");
    let output = run_msc("", &["check", table.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.contains("duplicate exit type: desertDoubleDoor door"), "stdout: {}", out);
    assert!(out.contains("4 screen(s), 1 warning(s)"), "stdout: {}", out);
}

#[test]
fn test_lookup_without_fix() {
    let table = fixture("desert.json");
    let output = run_msc(
        "",
        &["lookup", table.to_str().unwrap(), "--id", "0x0c", "--tileset", "desert"],
    );

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("desertCaveEntrance"));
    assert!(!out.contains("desertCaveRocks"));
}

#[test]
fn test_lookup_with_fix() {
    let table = fixture("desert.json");
    let config = "[[fix]]\nname = \"desert-rocks\"\n";
    let output = run_msc(
        config,
        &["lookup", table.to_str().unwrap(), "--id", "12", "--tileset", "desert"],
    );

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("desertCaveEntrance"));
    assert!(out.contains("desertCaveRocks [desert]"));
}

#[test]
fn test_lookup_rejects_bad_id() {
    let table = fixture("desert.json");
    let output = run_msc("", &["lookup", table.to_str().unwrap(), "--id", "zz"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_lookup_rejects_unknown_tileset() {
    let table = fixture("desert.json");
    let output =
        run_msc("", &["lookup", table.to_str().unwrap(), "--id", "12", "--tileset", "moon"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown tileset 'moon'"));
}

#[test]
fn test_apply_plan_prints_snapshot() {
    let table = fixture("desert.json");
    let plan = std::fs::read_to_string(fixture("plan.toml")).unwrap();
    let output = run_msc(&plan, &["apply", table.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let snapshot: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    // Both id-12 variants moved to virtual id -2; the new art took over 12.
    assert_eq!(snapshot["screens"][0]["id"], -2);
    assert_eq!(snapshot["screens"][1]["id"], -2);
    assert_eq!(snapshot["screens"][3]["id"], 12);
    assert_eq!(snapshot["screens"][3]["definition"], "missing");
    assert_eq!(snapshot["fixed"][0], "desert-rocks");
    assert_eq!(snapshot["ids"]["12"], serde_json::json!([3]));
}

#[test]
fn test_apply_duplicate_target_fails() {
    let table = fixture("desert.json");
    let config = "[[renumber]]\nfrom = 12\nto = 13\n";
    let output = run_msc(config, &["apply", table.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ID already used: 0x0d: desertDoubleDoor"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_config_rejected() {
    let table = fixture("desert.json");
    let config = std::fs::read_to_string(fixture("duplicate_fix.toml")).unwrap();
    let output = run_msc(&config, &["check", table.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("listed more than once"));
}

#[test]
fn test_missing_table() {
    let output = run_msc("", &["check", "does/not/exist.json"]);
    assert_eq!(output.status.code(), Some(2));
}
