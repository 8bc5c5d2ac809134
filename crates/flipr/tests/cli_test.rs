//! Integration tests for the `flipr` CLI binary.
//!
//! Argument parsing, help output, shell completions and error exit codes
//! run without any network. The measure/login flows run against a local
//! `wiremock` server standing in for the Flipr cloud.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `flipr` binary with env isolation.
///
/// Clears all `FLIPR_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn flipr_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("flipr");
    cmd.env("HOME", "/tmp/flipr-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/flipr-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("FLIPR_PROFILE")
        .env_remove("FLIPR_USERNAME")
        .env_remove("FLIPR_PASSWORD")
        .env_remove("FLIPR_SERIAL")
        .env_remove("FLIPR_BASE_URL")
        .env_remove("FLIPR_OUTPUT")
        .env_remove("FLIPR_INSECURE")
        .env_remove("FLIPR_TIMEOUT")
        .env_remove("HTTP_PROXY")
        .env_remove("HTTPS_PROXY")
        .env_remove("ALL_PROXY");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run `flipr` against `base_url` with a ready account, off the async runtime.
async fn run_against(base_url: String, args: &'static [&'static str]) -> std::process::Output {
    tokio::task::spawn_blocking(move || {
        flipr_cmd()
            .env("FLIPR_PASSWORD", "secret")
            .args(["--base-url", base_url.as_str(), "--username", "pool@example.com"])
            .args(args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

async fn mock_cloud(token_status: u16) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/OAuth2/token"))
        .respond_with(ResponseTemplate::new(token_status).set_body_json(json!({
            "access_token": "tok-cli",
            "expires": 3600
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/modules/AB12CD/survey/last"))
        .and(header("authorization", "Bearer tok-cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "DateTime": "2020-06-15T08:12:34Z",
            "Battery": { "Deviation": 0.5 },
            "CloudCoverage": 0.25,
            "UvIndex": 3.0,
            "Temperature": 20.0,
            "Desinfectant": { "Label": "Chlore", "Deviation": -0.4, "DeviationSector": "MediumLow" },
            "PH": { "Value": 7.2, "Deviation": 0.05, "DeviationSector": "medium" },
            "Source": 0
        })))
        .mount(&server)
        .await;

    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = flipr_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    flipr_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Flipr")
            .and(predicate::str::contains("measure"))
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_password_flag_is_hidden() {
    flipr_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--password").not());
}

#[test]
fn test_version_flag() {
    flipr_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flipr"));
}

#[test]
fn test_measure_help_lists_options() {
    flipr_cmd()
        .args(["measure", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--unit")
                .and(predicate::str::contains("--raw"))
                .and(predicate::str::contains("fahrenheit")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    flipr_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("path"))
                .and(predicate::str::contains("set-password")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    flipr_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    flipr_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    flipr_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` falls back to the default config when no file exists.
    flipr_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_path() {
    flipr_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = flipr_cmd().arg("foobar").output().unwrap();
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
fn test_invalid_unit() {
    let output = flipr_cmd()
        .args(["measure", "--unit", "rankine"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("possible values") || text.contains("invalid value"),
        "Expected error about valid units:\n{text}"
    );
}

#[test]
fn test_measure_no_config() {
    let output = flipr_cmd().arg("measure").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("Configuration file not found"),
        "Expected missing-config error:\n{text}"
    );
}

#[test]
fn test_unknown_profile() {
    flipr_cmd()
        .args(["--profile", "cabin", "login"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cabin"));
}

#[test]
fn test_measure_without_serial() {
    // Fails before any request, so the unroutable base URL is never contacted.
    flipr_cmd()
        .env("FLIPR_PASSWORD", "secret")
        .args([
            "--username",
            "pool@example.com",
            "--base-url",
            "http://127.0.0.1:9",
            "measure",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("deviceSerial"));
}

// ── Against a mock cloud ────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_measure_json() {
    let server = mock_cloud(200).await;

    let output = run_against(
        server.uri(),
        &["--serial", "AB12CD", "-o", "json-compact", "measure"],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["temperature"], 20.0);
    assert_eq!(body["unit"], "celsius");
    assert_eq!(body["battery"], 50.0);
    assert_eq!(body["cloud_coverage"], 25.0);
    assert_eq!(body["ph"], 7.2);
    assert_eq!(body["ph_deviation"], "medium");
    assert_eq!(body["disinfectant"], "chlorine");
    assert_eq!(body["disinfectant_deviation"], "medium_low");
    assert_eq!(body["source"], "sigfox");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_measure_plain_raw_fahrenheit() {
    let server = mock_cloud(200).await;

    let output = run_against(
        server.uri(),
        &[
            "--serial", "AB12CD", "-o", "plain", "measure", "--raw", "--unit", "fahrenheit",
        ],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("temperature=68\n"), "{stdout}");
    assert!(stdout.contains("unit=fahrenheit"), "{stdout}");
    assert!(stdout.contains("battery=0.5\n"), "{stdout}");
    assert!(stdout.contains("disinfectant_deviation=-0.40"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_reports_expiry() {
    let server = mock_cloud(200).await;

    let output = run_against(server.uri(), &["-o", "json", "login"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["username"], "pool@example.com");
    assert!(body["expires_at"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_bad_credentials_exit_code() {
    let server = mock_cloud(401).await;

    let output = run_against(server.uri(), &["login"]).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Authentication failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_measure_unknown_device() {
    let server = mock_cloud(200).await;

    let output = run_against(server.uri(), &["--serial", "NOPE", "measure"]).await;
    assert_eq!(output.status.code(), Some(1), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("404"));
}
