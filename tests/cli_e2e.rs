//! End-to-end CLI tests for the dbexport binary.

// `Command::cargo_bin` is deprecated in assert_cmd >=2.0.17 in favor of
// `cargo::cargo_bin_cmd!` macro. Suppressed until migration to the new API.
#![allow(deprecated)]

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use support::socket_guard::start_mock_server_or_skip;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command with an isolated, empty config home so no user config leaks in.
fn dbexport_cmd(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("dbexport").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn connect_args(server: &MockServer) -> Vec<String> {
    let address = server.address();
    vec![
        "--scheme".to_string(),
        "http".to_string(),
        "--host".to_string(),
        address.ip().to_string(),
        "--port".to_string(),
        address.port().to_string(),
    ]
}

#[test]
fn test_cli_help_shows_example() {
    let temp = TempDir::new().unwrap();
    dbexport_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--auth"))
        .stdout(predicate::str::contains("dbexport --auth root:root backup.db"));
}

#[test]
fn test_cli_without_path_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let assert = dbexport_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No filepath provided."));
    assert_eq!(assert.get_output().status.code(), Some(2));
}

#[test]
fn test_cli_with_two_paths_is_usage_error_and_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("a.db");
    let second = temp.path().join("b.db");

    let assert = dbexport_cmd(temp.path())
        .arg(&first)
        .arg(&second)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No filepath provided."));
    assert_eq!(assert.get_output().status.code(), Some(2));
    assert!(!first.exists());
    assert!(!second.exists());
}

#[test]
fn test_cli_unsupported_scheme_fails_after_creating_file() {
    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("backup.db");

    let assert = dbexport_cmd(temp.path())
        .args(["--scheme", "ftp"])
        .arg(&destination)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "please specify 'http' or 'https' for the scheme",
        ));
    assert_eq!(assert.get_output().status.code(), Some(1));
    assert!(destination.exists());
}

#[test]
fn test_cli_failure_prints_user_message_once() {
    let temp = TempDir::new().unwrap();

    let assert = dbexport_cmd(temp.path())
        .args(["--scheme", "ftp"])
        .arg(temp.path().join("backup.db"))
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(
        stderr,
        "Connection failed - please specify 'http' or 'https' for the scheme.\n"
    );
}

#[test]
fn test_cli_failure_detail_logged_with_debug_verbosity() {
    let temp = TempDir::new().unwrap();

    dbexport_cmd(temp.path())
        .args(["-vv", "--scheme", "ftp"])
        .arg(temp.path().join("backup.db"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("export failed"))
        .stderr(predicate::str::contains("kind=configuration"));
}

#[test]
fn test_cli_unwritable_destination_fails() {
    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("missing-dir").join("backup.db");

    dbexport_cmd(temp.path())
        .arg(&destination)
        .assert()
        .failure()
        .stderr(predicate::str::contains("please check the filepath"));
}

#[tokio::test]
async fn test_cli_success_writes_file_and_prints_nothing() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/export"))
        .and(header("authorization", "Basic cm9vdDpyb290"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"DEFINE NAMESPACE test;"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("backup.db");

    dbexport_cmd(temp.path())
        .args(connect_args(&mock_server))
        .arg(&destination)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert_eq!(
        std::fs::read(&destination).unwrap(),
        b"DEFINE NAMESPACE test;"
    );
}

#[tokio::test]
async fn test_cli_custom_auth_is_sent() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    // base64("admin:pw")
    Mock::given(method("GET"))
        .and(path("/export"))
        .and(header("authorization", "Basic YWRtaW46cHc="))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    dbexport_cmd(temp.path())
        .args(connect_args(&mock_server))
        .args(["-a", "admin:pw"])
        .arg(temp.path().join("backup.db"))
        .assert()
        .success();
}

#[tokio::test]
async fn test_cli_unauthorized_reports_authentication_failure() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    let assert = dbexport_cmd(temp.path())
        .args(connect_args(&mock_server))
        .args(["--auth", "root:wrong"])
        .arg(temp.path().join("backup.db"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"))
        .stderr(predicate::str::contains("root:wrong").not());
    assert_eq!(assert.get_output().status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
}

#[tokio::test]
async fn test_cli_server_error_prints_server_body() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    dbexport_cmd(temp.path())
        .args(connect_args(&mock_server))
        .arg(temp.path().join("backup.db"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("disk full"));
}

#[tokio::test]
async fn test_cli_reads_connection_from_config_file() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"from config"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("dbexport");
    std::fs::create_dir_all(&config_dir).unwrap();
    let address = mock_server.address();
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "scheme = \"http\"\nhost = \"{}\"\nport = \"{}\"\n",
            address.ip(),
            address.port()
        ),
    )
    .unwrap();
    let destination = temp.path().join("backup.db");

    dbexport_cmd(temp.path())
        .arg(&destination)
        .assert()
        .success();

    assert_eq!(std::fs::read(&destination).unwrap(), b"from config");
}

#[test]
fn test_cli_invalid_config_file_fails() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("broken.toml");
    std::fs::write(&config_path, "retries = \"3\"\n").unwrap();

    dbexport_cmd(temp.path())
        .arg("--config")
        .arg(&config_path)
        .arg(temp.path().join("backup.db"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}
