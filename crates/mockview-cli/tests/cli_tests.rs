//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn mockview(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mockview").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("MOCKVIEW_STORE_PATH")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a config using a file store inside `dir`.
fn file_store_config(dir: &Path) -> PathBuf {
    let path = dir.join("mockview.toml");
    let store = dir.join("data");
    std::fs::write(
        &path,
        format!(
            "total_rounds = 3\n\n[store]\ntype = \"file\"\npath = \"{}\"\n",
            store.display()
        ),
    )
    .unwrap();
    path
}

fn run_json(dir: &Path, config: &Path, args: &[&str]) -> Value {
    let output = mockview(dir)
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "mockview {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn create_session(dir: &Path, config: &Path) -> String {
    let created = run_json(
        dir,
        config,
        &[
            "create",
            "--mode",
            "text",
            "--job-role",
            "Backend Engineer",
            "--experience",
            "2 years",
            "--difficulty",
            "Easy",
        ],
    );
    created["session_id"].as_str().unwrap().to_string()
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mockview.toml"));

    let content = std::fs::read_to_string(dir.path().join("mockview.toml")).unwrap();
    assert!(content.contains("type = \"file\""));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path()).arg("init").assert().success();

    mockview(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_updates_store_path_in_place() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mockview.toml"),
        "# my settings\ntotal_rounds = 2\n\n[store]\ntype = \"none\"\n",
    )
    .unwrap();

    mockview(dir.path())
        .args(["init", "--store-path", "sessions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let content = std::fs::read_to_string(dir.path().join("mockview.toml")).unwrap();
    assert!(content.contains("# my settings"));
    assert!(content.contains("path = \"sessions\""));
}

#[test]
fn create_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args([
            "create",
            "--mode",
            "video",
            "--job-role",
            "SRE",
            "--experience",
            "1 year",
            "--difficulty",
            "Easy",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("video"));
}

#[test]
fn create_rejects_unknown_difficulty() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args([
            "create",
            "--mode",
            "text",
            "--job-role",
            "SRE",
            "--experience",
            "1 year",
            "--difficulty",
            "Hard",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Hard"));
}

#[test]
fn full_session_through_the_cli() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());
    let session_id = create_session(dir.path(), &config);
    assert!(session_id.starts_with("sess_"));
    assert_eq!(session_id.len(), "sess_".len() + 32);

    let next = run_json(
        dir.path(),
        &config,
        &["question", "--session-id", &session_id, "--difficulty", "Easy"],
    );
    assert_eq!(next["question"]["difficulty"], "Easy");
    assert_eq!(next["progress"]["current"], 1);
    assert_eq!(next["progress"]["total"], 3);
    let question_id = next["question"]["id"].as_str().unwrap().to_string();

    let feedback = run_json(
        dir.path(),
        &config,
        &[
            "answer",
            "--session-id",
            &session_id,
            "--question-id",
            &question_id,
            "--answer",
            "I designed and operated REST services with careful versioning, \
             pagination and idempotent retries across several teams.",
        ],
    );
    assert_eq!(feedback["correct"], true);
    assert_eq!(feedback["next_available"], true);

    let summary = run_json(dir.path(), &config, &["summary", "--session-id", &session_id]);
    assert_eq!(summary["score"], feedback["content_score"]);

    let status = run_json(dir.path(), &config, &["status", "--session-id", &session_id]);
    assert_eq!(status["state"], "in_progress");
    assert_eq!(status["session"]["_id"], session_id.as_str());

    let report = run_json(
        dir.path(),
        &config,
        &["report", "--session-id", &session_id, "--format", "json"],
    );
    assert_eq!(report["plan"].as_array().unwrap().len(), 5);
    assert!(report["categories"]["Technical"].is_u64());
}

#[test]
fn answer_to_unissued_question_fails() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());
    let session_id = create_session(dir.path(), &config);

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args([
            "answer",
            "--session-id",
            &session_id,
            "--question-id",
            "q_forged",
            "--answer",
            "anything",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("was not issued"));
}

#[test]
fn unknown_session_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["question", "--session-id", "sess_missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("session not found"));
}

#[test]
fn report_writes_html_file() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());
    let session_id = create_session(dir.path(), &config);
    let out = dir.path().join("reports").join("report.html");

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "--session-id", &session_id, "--format", "html", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains(&session_id));
    assert!(html.contains("No answers submitted yet"));
}

#[test]
fn report_writes_json_file() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());
    let session_id = create_session(dir.path(), &config);
    let out = dir.path().join("reports").join("report.json");

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "--session-id", &session_id, "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Report written"));

    let report: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["overall"], 0);
    assert_eq!(report["plan"].as_array().unwrap().len(), 5);
}

#[test]
fn report_text_table() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());
    let session_id = create_session(dir.path(), &config);

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "--session-id", &session_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Communication"))
        .stdout(predicate::str::contains("Study plan"));
}

#[test]
fn report_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());
    let session_id = create_session(dir.path(), &config);

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "--session-id", &session_id, "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn pricing_and_payment() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());

    let prices = run_json(dir.path(), &config, &["pricing"]);
    assert_eq!(prices["text"]["price"], 49);
    assert_eq!(prices["voice"]["price"], 119);
    assert_eq!(prices["text"]["currency"], "INR");

    let receipt = run_json(
        dir.path(),
        &config,
        &["pay", "--amount", "119", "--mode", "voice"],
    );
    assert_eq!(receipt["status"], "success");
    assert!(receipt["transaction_id"].as_str().unwrap().starts_with("pay_"));

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["pay", "--amount", "0", "--mode", "text"])
        .assert()
        .failure();
}

#[test]
fn health_lists_collections() {
    let dir = TempDir::new().unwrap();
    let config = file_store_config(dir.path());
    create_session(dir.path(), &config);

    let health = run_json(dir.path(), &config, &["health"]);
    assert_eq!(health["backend"], "running");
    assert_eq!(health["store"], "file");
    assert_eq!(health["connected"], true);
    assert_eq!(health["collections"][0], "session");
}

#[test]
fn runs_without_a_store() {
    let dir = TempDir::new().unwrap();

    let output = mockview(dir.path())
        .args([
            "create",
            "--mode",
            "voice",
            "--job-role",
            "Analyst",
            "--experience",
            "fresher",
            "--difficulty",
            "Mixed",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let created: Value = serde_json::from_slice(&output.stdout).unwrap();
    let session_id = created["session_id"].as_str().unwrap();

    let output = mockview(dir.path())
        .args(["question", "--session-id", session_id])
        .output()
        .unwrap();
    assert!(output.status.success());
    let next: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(next["progress"]["current"], 1);
    assert_eq!(next["progress"]["total"], 5);

    mockview(dir.path())
        .args(["status", "--session-id", session_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn memory_store_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("mockview.toml");
    std::fs::write(&config, "[store]\ntype = \"memory\"\n").unwrap();

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .args([
            "create",
            "--mode",
            "text",
            "--job-role",
            "Backend Engineer",
            "--experience",
            "2 years",
            "--difficulty",
            "Mixed",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does not persist between mockview commands"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path())
        .args(["--config", "nonexistent.toml", "pricing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
