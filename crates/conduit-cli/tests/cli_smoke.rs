//! End-to-end smoke tests driving the compiled `conduit` binary against the
//! `fake-agent` fixture.

use assert_cmd::Command;
use conduit_testing::{FakeAgentProcess, Script};
use predicates::prelude::*;

#[test]
fn providers_lists_every_known_dialect() {
    let mut cmd = Command::cargo_bin("conduit").unwrap();
    cmd.arg("providers");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("claude"))
        .stdout(predicate::str::contains("codex"))
        .stdout(predicate::str::contains("gemini"))
        .stdout(predicate::str::contains("opencode"))
        .stdout(predicate::str::contains("vibe"));
}

#[test]
fn run_against_fake_agent_reports_a_clean_exit_summary() {
    let script = Script::new()
        .stdout(r#"{"type":"system","subtype":"init","session_id":"cli-smoke-1"}"#)
        .stdout(r#"{"type":"result","subtype":"success","result":"done"}"#)
        .exit(0);

    let mut cmd = Command::cargo_bin("conduit").unwrap();
    cmd.env("CONDUIT_FAKE_SCRIPT", script.to_json())
        .arg("run")
        .arg("--agent")
        .arg("claude")
        .arg("--command")
        .arg(FakeAgentProcess::binary_path())
        .arg("--prompt")
        .arg("hello");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("exit=0"))
        .stderr(predicate::str::contains("session=cli-smoke-1"));
}

#[test]
fn run_surfaces_the_childs_exit_code_as_its_own() {
    let script = Script::new()
        .stdout(r#"{"type":"system","subtype":"init","session_id":"cli-smoke-2"}"#)
        .exit(3);

    let mut cmd = Command::cargo_bin("conduit").unwrap();
    cmd.env("CONDUIT_FAKE_SCRIPT", script.to_json())
        .arg("run")
        .arg("--agent")
        .arg("codex")
        .arg("--command")
        .arg(FakeAgentProcess::binary_path());

    cmd.assert().code(3);
}

#[test]
fn prompt_and_prompt_file_are_mutually_exclusive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompt.txt");
    std::fs::write(&path, "hi").unwrap();

    let mut cmd = Command::cargo_bin("conduit").unwrap();
    cmd.arg("run")
        .arg("--agent")
        .arg("claude")
        .arg("--command")
        .arg(FakeAgentProcess::binary_path())
        .arg("--prompt")
        .arg("hi")
        .arg("--prompt-file")
        .arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("mutually exclusive"));
}
