//! Tests for `sealant.toml` handling.

use crate::support::*;

fn write_config(t: &Test, extra: &str) {
    let contents = format!(
        "[controller]\npublic_key = \"{}\"\n{}",
        t.key_path().display(),
        extra
    );
    t.write("sealant.toml", &contents);
}

#[test]
fn test_key_from_config_file() {
    let t = Test::new();
    write_config(&t, "");

    let output = t
        .cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME])
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(record_json(&output)["spec"]["encryptedData"]["a"].is_string());
}

#[test]
fn test_explicit_config_path() {
    let t = Test::new();
    let contents = format!("[controller]\npublic_key = \"{}\"\n", t.key_path().display());
    let path = t.write("custom.toml", &contents);

    let output = t
        .cmd()
        .arg("--config")
        .arg(&path)
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME])
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_missing_explicit_config_fails() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "missing.toml", "seal", "-n", NAMESPACE, "--name", SECRET_NAME])
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "config file not found");
}

#[test]
fn test_preserve_from_config_file() {
    let t = Test::new();
    write_config(&t, "\n[annotations]\npreserve = [\"owner\"]\n");
    let annotations = t.write("annotations.env", "owner=team-x");

    let output = t
        .cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME, "--annotations"])
        .arg(&annotations)
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(
        record_json(&output)["metadata"]["annotations"][OWNER_ANNOTATION],
        "team-x"
    );
}

#[test]
fn test_invalid_workers_rejected() {
    let t = Test::new();
    write_config(&t, "\n[sealing]\nworkers = 0\n");

    let output = t
        .cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME])
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "sealing.workers");
}

#[test]
fn test_scope_annotation_in_preserve_rejected() {
    let t = Test::new();
    write_config(
        &t,
        "\n[annotations]\npreserve = [\"sealedsecrets.bitnami.com/cluster-wide\"]\n",
    );

    let output = t
        .cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME])
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "scope annotation");
}
