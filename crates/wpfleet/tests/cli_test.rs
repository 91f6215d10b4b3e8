//! Integration tests for the `wpfleet` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring live API credentials.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wpfleet` binary with env isolation.
///
/// Clears all `WPFLEET_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn wpfleet_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wpfleet");
    cmd.env("HOME", "/tmp/wpfleet-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/wpfleet-cli-test-nonexistent")
        .env_remove("WPFLEET_PROFILE")
        .env_remove("WPFLEET_API_URL")
        .env_remove("WPFLEET_COMPANY")
        .env_remove("WPFLEET_API_KEY")
        .env_remove("WPFLEET_OUTPUT")
        .env_remove("WPFLEET_TIMEOUT")
        .env_remove("WPFLEET_POLL_INTERVAL")
        .env_remove("WPFLEET_MAX_POLLS");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = wpfleet_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("Usage"),
        "Expected 'Usage' in output:\n{text}"
    );
}

#[test]
fn test_help_flag() {
    wpfleet_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("WordPress")
            .and(predicate::str::contains("plugins"))
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("update")),
    );
}

#[test]
fn test_version_flag() {
    wpfleet_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wpfleet"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    wpfleet_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    wpfleet_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    wpfleet_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = wpfleet_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_plugins_no_company() {
    // Without a company id the command must fail before touching the
    // network, with usage exit code 2.
    let output = wpfleet_cmd()
        .args(["--api-key", "test-key", "plugins"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("company"),
        "Expected error mentioning company:\n{text}"
    );
}

#[test]
fn test_plugins_no_api_key() {
    let output = wpfleet_cmd()
        .args(["--company", "acme", "plugins"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("API key") || text.contains("WPFLEET_API_KEY"),
        "Expected error mentioning the API key:\n{text}"
    );
}

#[test]
fn test_invalid_api_url() {
    let output = wpfleet_cmd()
        .args([
            "--company",
            "acme",
            "--api-key",
            "test-key",
            "--api-url",
            "not a url",
            "plugins",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("api-url") || text.contains("URL"),
        "Expected error about the API URL:\n{text}"
    );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    wpfleet_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path_prints_location() {
    wpfleet_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wpfleet.toml"));
}

#[test]
fn test_invalid_output_format() {
    let output = wpfleet_cmd()
        .args(["--output", "invalid", "plugins"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_update_env_conflicts_with_all() {
    let output = wpfleet_cmd()
        .args(["update", "akismet", "--env", "17", "--all"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("cannot be used with"),
        "Expected clap conflict error:\n{text}"
    );
}

#[test]
fn test_update_requires_plugin() {
    let output = wpfleet_cmd().arg("update").output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be about
    // missing credentials, not about argument parsing.
    wpfleet_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--timeout",
            "60",
            "--poll-interval",
            "2",
            "--max-polls",
            "10",
            "--company",
            "acme",
            "plugins",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("API key").or(predicate::str::contains("WPFLEET_API_KEY")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_sites_help() {
    wpfleet_cmd()
        .args(["sites", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plugin"));
}

#[test]
fn test_update_help() {
    wpfleet_cmd()
        .args(["update", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--env")
                .and(predicate::str::contains("--all"))
                .and(predicate::str::contains("--version")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    wpfleet_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("path")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("init")),
        );
}
