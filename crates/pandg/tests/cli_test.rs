//! Integration tests for the `pandg` CLI binary.
//!
//! Queries run against JSON/YAML snapshot files, so no Panorama appliance
//! is needed.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// ── Helpers ─────────────────────────────────────────────────────────

const CONFIG_HOME: &str = "/tmp/pandg-cli-test-nonexistent";

/// Build a [`Command`] for the `pandg` binary with env isolation.
///
/// Clears all `PANDG_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn pandg_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pandg");
    cmd.env("HOME", CONFIG_HOME)
        .env("XDG_CONFIG_HOME", CONFIG_HOME)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PANDG_PROFILE")
        .env_remove("PANDG_DEFAULT_PROFILE")
        .env_remove("PANDG_URL")
        .env_remove("PANDG_API_KEY")
        .env_remove("PANDG_OUTPUT")
        .env_remove("PANDG_INSECURE")
        .env_remove("PANDG_TIMEOUT")
        .env_remove("PANDG_USERNAME")
        .env_remove("PANDG_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

const SNAPSHOT: &str = r#"[
  {
    "name": "Prod",
    "description": "Production firewalls",
    "tag": [{ "name": "Prod-Services", "color": "color3" }, { "name": "Legacy", "color": "colorX" }]
  },
  { "name": "Dev", "tag": ["Dev-Only"] },
  { "name": "Orphan" },
  { "tag": ["Prod-Services"] }
]"#;

fn write_snapshot(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Run a query against the standard snapshot and parse the JSON envelope.
fn query_json(criterion: &[&str]) -> Value {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), "groups.json", SNAPSHOT);

    let output = pandg_cmd()
        .args(["device-groups", "query", "--output", "json", "--from-file"])
        .arg(&snapshot)
        .args(criterion)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "query failed:\n{}",
        combined_output(&output)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = pandg_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    pandg_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("device groups")
            .and(predicate::str::contains("device-groups"))
            .and(predicate::str::contains("colors"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    pandg_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pandg"));
}

#[test]
fn test_query_help_lists_all_criteria() {
    pandg_cmd()
        .args(["dg", "query", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--name")
                .and(predicate::str::contains("--name-regex"))
                .and(predicate::str::contains("--tag"))
                .and(predicate::str::contains("--tag-regex"))
                .and(predicate::str::contains("--from-file")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    pandg_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    pandg_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Query modes ─────────────────────────────────────────────────────

#[test]
fn test_exact_name_fills_results() {
    let envelope = query_json(&["--name", "Prod"]);
    assert_eq!(
        envelope,
        json!({
            "changed": false,
            "results": { "name": "Prod", "tag": ["Prod-Services", "Legacy"] },
            "objects": [{ "name": "Prod", "tag": ["Prod-Services", "Legacy"] }]
        })
    );
}

#[test]
fn test_exact_name_finds_untagged_group() {
    let envelope = query_json(&["--name", "Orphan"]);
    assert_eq!(
        envelope,
        json!({
            "changed": false,
            "results": { "name": "Orphan", "tag": null },
            "objects": [{ "name": "Orphan", "tag": null }]
        })
    );
}

#[test]
fn test_exact_tag_matches_whole_tag_names() {
    let envelope = query_json(&["--tag", "Dev-Only"]);
    assert_eq!(
        envelope["objects"],
        json!([{ "name": "Dev", "tag": ["Dev-Only"] }])
    );
    assert_eq!(envelope["results"], json!({}));

    let envelope = query_json(&["--tag", "Dev"]);
    assert_eq!(envelope["objects"], json!([]));
}

#[test]
fn test_tag_regex_is_unanchored_and_skips_malformed_records() {
    let envelope = query_json(&["--tag-regex", "Prod"]);
    // The nameless record also carries Prod-Services but is malformed.
    assert_eq!(
        envelope["objects"],
        json!([{ "name": "Prod", "tag": ["Prod-Services", "Legacy"] }])
    );
}

#[test]
fn test_name_regex_returns_detail_with_color_labels() {
    let envelope = query_json(&["--name-regex", ".*Prod.*"]);
    assert_eq!(
        envelope["objects"],
        json!([{
            "name": "Prod",
            "description": "Production firewalls",
            "tag": [
                { "name": "Prod-Services", "color": "blue" },
                { "name": "Legacy", "color": "colorX" }
            ]
        }])
    );
    assert_eq!(envelope["changed"], json!(false));
}

#[test]
fn test_plain_output_lists_names_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), "groups.json", SNAPSHOT);

    pandg_cmd()
        .args(["dg", "query", "--tag-regex", "-", "-o", "plain", "--from-file"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout("Prod\nDev\n");
}

#[test]
fn test_table_output_shows_matches() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), "groups.json", SNAPSHOT);

    pandg_cmd()
        .args(["dg", "query", "--name-regex", "Prod", "--from-file"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Prod-Services (blue)")
                .and(predicate::str::contains("Production firewalls")),
        );
}

#[test]
fn test_yaml_snapshot_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(
        dir.path(),
        "groups.yaml",
        "device_groups:\n  - name: Branch\n    tag: [Branch-Sites]\n",
    );

    pandg_cmd()
        .args(["dg", "query", "--tag", "Branch-Sites", "-o", "plain", "--from-file"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout("Branch\n");
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_query_requires_a_criterion() {
    let output = pandg_cmd()
        .args(["device-groups", "query"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("required"), "Expected missing-argument error:\n{text}");
}

#[test]
fn test_criteria_are_mutually_exclusive() {
    let output = pandg_cmd()
        .args(["device-groups", "query", "--name", "Prod", "--tag", "Dev-Only"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("cannot be used with"),
        "Expected conflict error:\n{text}"
    );
}

#[test]
fn test_invalid_regex_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path(), "groups.json", SNAPSHOT);

    let output = pandg_cmd()
        .args(["dg", "query", "--tag-regex", "[unclosed", "-o", "json", "--from-file"])
        .arg(&snapshot)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty(), "No partial results expected");
    let text = combined_output(&output);
    assert!(text.contains("Invalid regex"), "Expected regex error:\n{text}");
}

#[test]
fn test_missing_snapshot_file() {
    let output = pandg_cmd()
        .args([
            "dg",
            "query",
            "--name",
            "Prod",
            "--from-file",
            "/tmp/pandg-cli-test-nonexistent/groups.json",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("snapshot"), "Expected snapshot error:\n{text}");
}

#[test]
fn test_query_without_panorama_configured() {
    let output = pandg_cmd()
        .args(["dg", "query", "--name", "Prod"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("No Panorama configured"),
        "Expected no-config error:\n{text}"
    );
}

#[test]
fn test_unknown_profile() {
    let output = pandg_cmd()
        .args(["--profile", "nope", "dg", "query", "--name", "Prod"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("nope"), "Expected profile error:\n{text}");
}

#[test]
fn test_url_without_credentials() {
    let output = pandg_cmd()
        .args(["--url", "https://pano.invalid", "dg", "query", "--name", "Prod"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(
        text.contains("No credentials"),
        "Expected credentials error:\n{text}"
    );
}

// ── Colors & config ─────────────────────────────────────────────────

#[test]
fn test_colors_json_lists_all_sixteen() {
    let output = pandg_cmd()
        .args(["colors", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let colors: Value = serde_json::from_slice(&output.stdout).unwrap();
    let colors = colors.as_array().unwrap();
    assert_eq!(colors.len(), 16);
    assert_eq!(colors[0], json!({ "code": "color1", "label": "red" }));
    assert_eq!(colors[11], json!({ "code": "color12", "label": "blue gray" }));
}

#[test]
fn test_colors_plain() {
    pandg_cmd()
        .args(["colors", "--output", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("color9\tlight green").and(predicate::str::contains("color16\tbrown")));
}

#[test]
fn test_config_path() {
    pandg_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_use_unknown_profile() {
    let output = pandg_cmd()
        .args(["config", "use", "missing"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}
