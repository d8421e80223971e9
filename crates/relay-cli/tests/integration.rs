use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// Build a `relay` invocation rooted in `dir` with a dummy deploy key
/// so credential loading never touches the real home directory.
fn relay(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relay").unwrap();
    cmd.current_dir(dir.path())
        .env("RELAY_PROJECT_DIR", dir.path())
        .env("RELAY_DEPLOY_KEY", "sk-test");
    cmd
}

fn link_app(dir: &TempDir, id: u64) {
    std::fs::write(
        dir.path().join(".relay-app.json"),
        format!("{{\"id\": {id}}}"),
    )
    .unwrap();
}

// ---------------------------------------------------------------------------
// Usage paths (no network)
// ---------------------------------------------------------------------------

#[test]
fn promote_without_version_prints_usage_and_succeeds() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .arg("promote")
        .assert()
        .success()
        .stdout(predicate::str::contains("no version selected"));
}

#[test]
fn migrate_without_target_version_prints_usage_and_succeeds() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .args(["migrate", "1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Must provide both old and new version"));
}

#[test]
fn migrate_rejects_user_combined_with_partial_percent() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .args(["migrate", "1.0.0", "1.0.1", "15%", "--user=user@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot define percent and user"));
}

#[test]
fn help_lists_the_lifecycle_commands() {
    let dir = TempDir::new().unwrap();
    relay(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("promote"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("link"));
}

#[test]
fn link_writes_the_app_sidecar() {
    let dir = TempDir::new().unwrap();
    relay(&dir).args(["link", "7"]).assert().success();
    let content = std::fs::read_to_string(dir.path().join(".relay-app.json")).unwrap();
    assert!(content.contains("7"));
}

// ---------------------------------------------------------------------------
// Full flows against a mock control plane
// ---------------------------------------------------------------------------

fn mock_check_and_app(server: &mut mockito::Server, public: bool, latest: &str) {
    server.mock("GET", "/check").with_status(200).create();
    server
        .mock("GET", "/apps/7")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"id": 7, "title": "Example", "public": public, "latest_version": latest})
                .to_string(),
        )
        .create();
}

#[test]
fn promote_confirmed_with_changelog_succeeds() {
    let mut server = mockito::Server::new();
    mock_check_and_app(&mut server, true, "1.0.0");
    let promote_mock = server
        .mock("PUT", "/apps/7/versions/1.0.1/promote/production")
        .match_body(mockito::Matcher::Json(json!({"changelog": "Fixed the thing."})))
        .with_status(200)
        .create();

    let dir = TempDir::new().unwrap();
    link_app(&dir, 7);
    std::fs::write(
        dir.path().join("CHANGELOG.md"),
        "## 1.0.1\n\nFixed the thing.\n",
    )
    .unwrap();

    relay(&dir)
        .env("RELAY_ENDPOINT", server.url())
        .args(["promote", "1.0.1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changelog found for 1.0.1!"))
        .stdout(predicate::str::contains("Promotion successful!"))
        .stdout(predicate::str::contains("relay migrate"));
    promote_mock.assert();
}

#[test]
fn promote_declined_exits_nonzero_without_calling_the_platform() {
    let mut server = mockito::Server::new();
    mock_check_and_app(&mut server, true, "1.0.0");
    let promote_mock = server
        .mock("PUT", "/apps/7/versions/1.0.1/promote/production")
        .expect(0)
        .create();

    let dir = TempDir::new().unwrap();
    link_app(&dir, 7);

    relay(&dir)
        .env("RELAY_ENDPOINT", server.url())
        .args(["promote", "1.0.1"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cancelled promote"));
    promote_mock.assert();
}

#[test]
fn promote_in_unlinked_directory_fails() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/check").with_status(200).create();

    let dir = TempDir::new().unwrap();
    relay(&dir)
        .env("RELAY_ENDPOINT", server.url())
        .args(["promote", "1.0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no linked app"));
}

#[test]
fn migrate_partial_percent_queues_the_migration() {
    let mut server = mockito::Server::new();
    mock_check_and_app(&mut server, false, "1.0.0");
    let migrate_mock = server
        .mock("POST", "/apps/7/versions/1.0.0/migrate-to/1.0.1")
        .match_body(mockito::Matcher::Json(json!({"percent": 15})))
        .with_status(200)
        .create();

    let dir = TempDir::new().unwrap();
    link_app(&dir, 7);

    relay(&dir)
        .env("RELAY_ENDPOINT", server.url())
        .args(["migrate", "1.0.0", "1.0.1", "15%"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Migration successfully queued"));
    migrate_mock.assert();
}

#[test]
fn activation_rejection_surfaces_the_activation_url() {
    let mut server = mockito::Server::new();
    mock_check_and_app(&mut server, false, "1.0.0");
    server
        .mock("PUT", "/apps/7/versions/1.0.1/promote/production")
        .with_status(403)
        .with_body(
            json!({"activationInfo": {"url": "https://platform.example/activate/7"}}).to_string(),
        )
        .create();
    server
        .mock("POST", "/apps/7/versions/1.0.1/app-review-run")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"failed": []}).to_string())
        .create();

    let dir = TempDir::new().unwrap();
    link_app(&dir, 7);

    relay(&dir)
        .env("RELAY_ENDPOINT", server.url())
        .args(["promote", "1.0.1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://platform.example/activate/7"));
}
