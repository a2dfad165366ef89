//! CLI contract tests.

use std::time::Duration;

use assert_cmd::Command;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn talentscout(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("talentscout").expect("binary should build");
    cmd.env("HOME", home)
        .env_remove("TALENTSCOUT_CONFIG")
        .env_remove("TALENTSCOUT_BASE_URL")
        .env_remove("TALENTSCOUT_MODEL")
        .env_remove("TALENTSCOUT_TIMEOUT_SECS")
        .env_remove("TALENTSCOUT_API_KEY")
        .env_remove("RUST_LOG")
        .timeout(Duration::from_secs(30));
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().expect("should create temp dir");
    let output = talentscout(home.path())
        .arg("--help")
        .output()
        .expect("should run");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for name in ["chat", "models", "check", "init"] {
        assert!(stdout.contains(name), "{name}");
    }
}

#[test]
fn models_lists_the_allow_list() {
    let home = tempfile::tempdir().expect("should create temp dir");
    let output = talentscout(home.path())
        .arg("models")
        .output()
        .expect("should run");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("llama3.1 (default)"));
    for name in ["llama3", "mistral", "codellama"] {
        assert!(stdout.contains(name), "{name}");
    }
}

#[test]
fn unsupported_model_flag_is_rejected() {
    let home = tempfile::tempdir().expect("should create temp dir");
    let output = talentscout(home.path())
        .args(["chat", "--model", "gpt-4"])
        .output()
        .expect("should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported model"));
}

#[test]
fn init_writes_config_once_unless_forced() {
    let home = tempfile::tempdir().expect("should create temp dir");

    let first = talentscout(home.path())
        .arg("init")
        .output()
        .expect("should run");
    assert!(first.status.success());
    let path = home.path().join(".talentscout").join("config.toml");
    let written = std::fs::read_to_string(&path).expect("config should exist");
    assert!(written.contains("[backend]"));

    let second = talentscout(home.path())
        .arg("init")
        .output()
        .expect("should run");
    assert!(!second.status.success());

    let forced = talentscout(home.path())
        .args(["init", "--force"])
        .output()
        .expect("should run");
    assert!(forced.status.success());
}

#[tokio::test(flavor = "multi_thread")]
async fn chat_runs_an_interview_over_stdin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Hello from TalentScout!\nMETADATA: {\"name\": true}"
                }
            }]
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().expect("should create temp dir");
    let base_url = format!("{}/v1", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        talentscout(home.path())
            .args(["chat", "--base-url", &base_url])
            .write_stdin("I'm Ana\n/progress\nbye\nstill there?\n/quit\n")
            .output()
            .expect("should run")
    })
    .await
    .expect("blocking task should finish");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("🤖 Hello from TalentScout!"));
    assert!(!stdout.contains("METADATA"));
    assert!(stdout.contains("✅ Basic Info"));
    assert!(stdout.contains("🔴 Interview Ended"));
    assert!(stdout.contains("The interview has ended."));

    let calls = server
        .received_requests()
        .await
        .expect("request recording is on");
    assert_eq!(calls.len(), 3, "greeting, one turn and the farewell");
}

#[tokio::test(flavor = "multi_thread")]
async fn chat_keeps_going_after_a_line_that_is_not_utf8() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1",
            "choices": [{
                "message": { "role": "assistant", "content": "Noted." }
            }]
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().expect("should create temp dir");
    let base_url = format!("{}/v1", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        talentscout(home.path())
            .args(["chat", "--base-url", &base_url])
            .write_stdin(b"caf\xe9 latte\nI'm Ana\n/quit\n".to_vec())
            .output()
            .expect("should run")
    })
    .await
    .expect("blocking task should finish");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let calls = server
        .received_requests()
        .await
        .expect("request recording is on");
    assert_eq!(calls.len(), 3, "greeting and both lines");
    let last = String::from_utf8_lossy(&calls[2].body);
    assert!(last.contains("I'm Ana"));
    let first_turn = String::from_utf8_lossy(&calls[1].body);
    assert!(first_turn.contains("caf\u{fffd} latte"));
}
