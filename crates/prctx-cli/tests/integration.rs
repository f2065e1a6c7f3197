//! Integration tests for the prctx CLI.
//!
//! The CI environment is passed per command so tests never touch the
//! process environment.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to get a prctx command with no CI variables inherited.
fn prctx() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prctx"));
    for var in [
        "GITHUB_TOKEN",
        "TRAVIS_REPO_SLUG",
        "TRAVIS_PULL_REQUEST",
        "GITHUB_API_URL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Helper to get a prctx command inside a pull-request build.
fn prctx_in_pr() -> Command {
    let mut cmd = prctx();
    cmd.env("TRAVIS_REPO_SLUG", "octo/widgets")
        .env("TRAVIS_PULL_REQUEST", "42");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be JSON")
}

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn test_version_flag() {
    prctx()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("prctx"));
}

#[test]
fn test_help_flag() {
    prctx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("context"))
        .stdout(predicate::str::contains("options"))
        .stdout(predicate::str::contains("comment"));
}

#[test]
fn test_no_subcommand_shows_help() {
    prctx()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_completions() {
    prctx()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prctx"));
}

// ============================================================================
// Context command tests
// ============================================================================

#[test]
fn test_context_outside_pull_request() {
    prctx()
        .arg("context")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not running in a travis pull request"));
}

#[test]
fn test_context_on_push_build() {
    prctx()
        .env("TRAVIS_REPO_SLUG", "octo/widgets")
        .env("TRAVIS_PULL_REQUEST", "false")
        .arg("context")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not running in a travis pull request"));
}

#[test]
fn test_context_invalid_pull_request() {
    prctx()
        .env("TRAVIS_REPO_SLUG", "octo/widgets")
        .env("TRAVIS_PULL_REQUEST", "abc")
        .arg("context")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected integer for TRAVIS_PULL_REQUEST",
        ));
}

#[test]
fn test_context_pull_request_digit_prefix() {
    prctx()
        .env("TRAVIS_REPO_SLUG", "octo/widgets")
        .env("TRAVIS_PULL_REQUEST", "42abc")
        .arg("context")
        .assert()
        .success()
        .stdout(predicate::str::contains("octo/widgets#42"));
}

#[test]
fn test_context_malformed_slug() {
    prctx()
        .env("TRAVIS_REPO_SLUG", "widgets")
        .env("TRAVIS_PULL_REQUEST", "42")
        .arg("context")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not running in a travis pull request"));
}

#[test]
fn test_context_human() {
    prctx_in_pr()
        .arg("context")
        .assert()
        .success()
        .stdout(predicate::str::contains("octo/widgets#42"))
        .stdout(predicate::str::contains("token: not set"));
}

#[test]
fn test_context_quiet_omits_details() {
    prctx_in_pr()
        .args(["context", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("octo/widgets#42"))
        .stdout(predicate::str::contains("token").not());
}

#[test]
fn test_context_json() {
    let value = stdout_json(
        prctx_in_pr()
            .env("GITHUB_TOKEN", "secret")
            .args(["context", "--json"]),
    );

    assert_eq!(
        value,
        json!({
            "owner": "octo",
            "repo": "widgets",
            "pull_request": 42,
            "authenticated": true,
        })
    );
}

#[test]
fn test_context_never_prints_token() {
    prctx_in_pr()
        .env("GITHUB_TOKEN", "super-secret-value")
        .args(["context", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("super-secret-value").not());
}

// ============================================================================
// Options command tests
// ============================================================================

#[test]
fn test_options_default() {
    let value = stdout_json(prctx_in_pr().arg("options"));
    assert_eq!(
        value,
        json!({ "owner": "octo", "repo": "widgets", "issue_number": 42 })
    );
}

#[test]
fn test_options_with_extra() {
    let value = stdout_json(prctx_in_pr().args(["options", "foo=1", "body=hi there"]));
    assert_eq!(
        value,
        json!({
            "owner": "octo",
            "repo": "widgets",
            "issue_number": 42,
            "foo": 1,
            "body": "hi there",
        })
    );
}

#[test]
fn test_options_extra_overrides() {
    let value = stdout_json(prctx_in_pr().args(["options", "issue_number=7"]));
    assert_eq!(value["issue_number"], json!(7));
}

#[test]
fn test_options_without_pull_request() {
    prctx()
        .env("TRAVIS_REPO_SLUG", "octo/widgets")
        .arg("options")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not running in a travis pull request"));
}

#[test]
fn test_options_invalid_param() {
    prctx_in_pr()
        .args(["options", "foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

// ============================================================================
// Comment command tests
// ============================================================================

#[test]
fn test_comment_outside_pull_request() {
    prctx()
        .args(["comment", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not running in a travis pull request"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_comment_posts_to_pull_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/issues/42/comments"))
        .and(header("authorization", "Bearer env-token"))
        .and(body_json(json!({ "body": "Build passed" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 77,
            "body": "Build passed",
            "html_url": "https://github.com/octo/widgets/pull/42#issuecomment-77",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    prctx_in_pr()
        .env("GITHUB_TOKEN", "env-token")
        .env("GITHUB_API_URL", mock_server.uri())
        .args(["comment", "Build passed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comment 77 saved"))
        .stdout(predicate::str::contains("issuecomment-77"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_comment_token_flag_overrides_env() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/issues/42/comments"))
        .and(header("authorization", "Bearer flag-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1, "body": "x" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    prctx_in_pr()
        .env("GITHUB_TOKEN", "env-token")
        .env("GITHUB_API_URL", mock_server.uri())
        .args(["comment", "x", "--token", "flag-token"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_comment_update() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/repos/octo/widgets/issues/comments/77"))
        .and(body_json(json!({ "body": "Build failed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77,
            "body": "Build failed",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    prctx_in_pr()
        .env("GITHUB_TOKEN", "env-token")
        .env("GITHUB_API_URL", mock_server.uri())
        .args(["comment", "Build failed", "--update", "77"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comment 77 saved"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_comment_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/issues/42/comments"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    prctx_in_pr()
        .env("GITHUB_API_URL", mock_server.uri())
        .args(["comment", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No token set"))
        .stderr(predicate::str::contains("GitHub authentication failed"));
}
