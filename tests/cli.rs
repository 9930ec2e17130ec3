use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_prints_usage_to_stdout_and_succeeds() {
    Command::cargo_bin("chatseg")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("usage: chatseg"));
}

#[test]
fn transcript_on_stdin_produces_sections_and_summary() {
    Command::cargo_bin("chatseg")
        .unwrap()
        .arg("-")
        .write_stdin("Alice: hi\n\nBob: hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalMessages\": 2"));
}

#[test]
fn missing_file_fails_with_an_error() {
    Command::cargo_bin("chatseg")
        .unwrap()
        .arg("/no/such/transcript.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn unknown_flags_are_rejected() {
    Command::cargo_bin("chatseg")
        .unwrap()
        .args(["--verbose", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown option"));
}
