//! Tests for error handling and CLI flags.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("seal"));
    assert!(out.contains("label"));
}

#[test]
fn test_version() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_malformed_values_rejected() {
    let t = Test::new();

    let output = t.seal("strict", MALFORMED_VALUES, &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "wrongly formatted value(s)");
    assert_stderr_contains(&output, "missing '=' at line: 1");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_unterminated_block_rejected() {
    let t = Test::new();

    let output = t.seal("strict", "cert=`line one\nline two", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unterminated multi-line value for 'cert'");
}

#[test]
fn test_empty_input_rejected() {
    let t = Test::new();

    let output = t.seal("strict", "", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "empty input");
}

#[test]
fn test_unknown_scope_rejected() {
    let t = Test::new();

    let output = t.seal("global", "a=1", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown scope 'global'");
}

#[test]
fn test_invalid_key_rejected() {
    let t = Test::new();

    let output = t.seal("strict", "bad key=1", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid key 'bad key'");
}

#[test]
fn test_name_with_slash_rejected() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["seal", "-n", "team-a", "--name", "db/extra", "--key"])
        .arg(t.key_path())
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret name");
}

#[test]
fn test_key_not_configured_gives_hint() {
    let t = Test::new();

    t.cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME])
        .write_stdin("a=1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("controller.public_key"))
        .stderr(predicate::str::contains("--key"));
}

#[test]
fn test_missing_key_file() {
    let t = Test::new();

    t.cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME, "--key", "nope.pem"])
        .write_stdin("a=1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to get public key"))
        .stderr(predicate::str::contains("kubeseal"));
}

#[test]
fn test_garbage_key_file() {
    let t = Test::new();
    let key = t.write("garbage.pem", "not a key");

    let output = t
        .cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME, "--key"])
        .arg(&key)
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to get public key");
}

#[test]
fn test_zero_workers_flag_rejected() {
    let t = Test::new();

    let output = t.seal("strict", "a=1", &["--workers", "0"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "sealing.workers");
}

#[test]
fn test_zero_timeout_flag_rejected() {
    let t = Test::new();

    let output = t.seal("strict", "a=1", &["--timeout", "0"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "sealing.timeout_secs");
}
