//! Tests for the `seal` command.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sealant::core::cipher::{Hybrid, LabelBinding};
use sealant::core::constants::{API_VERSION, KIND, NAMESPACE_WIDE_ANNOTATION};
use sealant::core::scope::Scope;

use crate::support::*;

fn strict_label() -> sealant::core::scope::Label {
    Scope::Strict.label(NAMESPACE, SECRET_NAME)
}

#[test]
fn test_seal_prints_record() {
    let t = Test::new();

    let output = t.seal("strict", SAMPLE_VALUES, &[]);
    assert_success(&output);

    let record = record_json(&output);
    assert_eq!(record["apiVersion"], API_VERSION);
    assert_eq!(record["kind"], KIND);
    assert_eq!(record["metadata"]["name"], SECRET_NAME);
    assert_eq!(record["metadata"]["namespace"], NAMESPACE);

    let data = record["spec"]["encryptedData"].as_object().unwrap();
    let keys: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["API_KEY", "DATABASE_URL", "tls.crt"]);
    assert_eq!(
        open_base64(data["tls.crt"].as_str().unwrap(), &strict_label()),
        "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----"
    );
    assert_stderr_contains(&output, "sealed 3 value(s) for team-a/db");
}

#[test]
fn test_seal_reads_values_file() {
    let t = Test::new();
    let values = t.write("values.env", "user=admin\npassword=hunter2\n\n");

    let output = t
        .cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME, "-f"])
        .arg(&values)
        .arg("--key")
        .arg(t.key_path())
        .output()
        .unwrap();

    // Trailing empty line is malformed.
    assert_failure(&output);

    t.write("values.env", "user=admin\npassword=hunter2");
    let output = t
        .cmd()
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME, "-f"])
        .arg(&values)
        .arg("--key")
        .arg(t.key_path())
        .output()
        .unwrap();
    assert_success(&output);

    let record = record_json(&output);
    let password = record["spec"]["encryptedData"]["password"].as_str().unwrap();
    assert_eq!(open_base64(password, &strict_label()), "hunter2");
}

#[test]
fn test_seal_merges_existing_values() {
    let t = Test::new();
    let existing = t.write("existing.env", "a=1\nb=2");

    let output = t.seal(
        "strict",
        "b=3\nc=4",
        &["--existing", existing.to_str().unwrap()],
    );
    assert_success(&output);

    let record = record_json(&output);
    let data = record["spec"]["encryptedData"].as_object().unwrap();
    let opened: Vec<String> = data
        .values()
        .map(|v| open_base64(v.as_str().unwrap(), &strict_label()))
        .collect();
    assert_eq!(opened, vec!["1", "3", "4"]);
}

#[test]
fn test_seal_namespace_scope_annotates() {
    let t = Test::new();

    let output = t.seal("namespace", "a=1", &[]);
    assert_success(&output);

    let record = record_json(&output);
    assert_eq!(
        record["metadata"]["annotations"][NAMESPACE_WIDE_ANNOTATION],
        "true"
    );
    assert_eq!(
        record["spec"]["template"]["metadata"]["annotations"][NAMESPACE_WIDE_ANNOTATION],
        "true"
    );
    let blob = record["spec"]["encryptedData"]["a"].as_str().unwrap();
    assert_eq!(
        open_base64(blob, &Scope::Namespace.label(NAMESPACE, "anything")),
        "1"
    );
}

#[test]
fn test_seal_preserves_allowed_annotations() {
    let t = Test::new();
    let annotations = t.write(
        "annotations.env",
        &format!(
            "{}=true\n{}=team-x\nunlisted=gone",
            NAMESPACE_WIDE_ANNOTATION, OWNER_ANNOTATION
        ),
    );

    let output = t.seal(
        "strict",
        "a=1",
        &[
            "--annotations",
            annotations.to_str().unwrap(),
            "--preserve",
            OWNER_ANNOTATION,
        ],
    );
    assert_success(&output);

    let record = record_json(&output);
    let kept = record["metadata"]["annotations"].as_object().unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[OWNER_ANNOTATION], "team-x");
    assert!(record["spec"]["template"]["metadata"]
        .get("annotations")
        .is_none());
}

#[test]
fn test_seal_preserve_from_env() {
    let t = Test::new();
    let annotations = t.write("annotations.env", "owner=team-x");

    let output = t
        .cmd()
        .env("SEALANT_PRESERVE_ANNOTATIONS", "owner")
        .args(["seal", "-n", NAMESPACE, "--name", SECRET_NAME, "--annotations"])
        .arg(&annotations)
        .arg("--key")
        .arg(t.key_path())
        .write_stdin("a=1")
        .output()
        .unwrap();
    assert_success(&output);

    let record = record_json(&output);
    assert_eq!(record["metadata"]["annotations"][OWNER_ANNOTATION], "team-x");
}

#[test]
fn test_seal_oaep_only_binding() {
    let t = Test::new();

    let output = t.seal("strict", "a=1", &["--label-binding", "oaep-only"]);
    assert_success(&output);

    let record = record_json(&output);
    let blob = STANDARD
        .decode(record["spec"]["encryptedData"]["a"].as_str().unwrap())
        .unwrap();

    let opened = Hybrid::new(LabelBinding::OaepOnly)
        .open(controller_key(), &strict_label(), &blob)
        .unwrap();
    assert_eq!(opened, b"1");
    assert!(Hybrid::default()
        .open(controller_key(), &strict_label(), &blob)
        .is_err());
}

#[test]
fn test_seal_output_differs_between_runs() {
    let t = Test::new();

    let first = record_json(&t.seal("strict", "a=1", &[]));
    let second = record_json(&t.seal("strict", "a=1", &[]));

    assert_ne!(
        first["spec"]["encryptedData"]["a"],
        second["spec"]["encryptedData"]["a"]
    );
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let t = Test::new();

    let output = t.seal("strict", "a=1", &["--verbose"]);
    assert_success(&output);

    // stdout stays a parseable record
    record_json(&output);
    assert_stderr_contains(&output, "sealing");
}

#[test]
fn test_first_seal_is_quiet() {
    let t = Test::new();

    let output = t.seal("strict", "a=1", &[]);
    assert_success(&output);

    let err = stderr(&output);
    assert!(!err.contains("WARN"), "unexpected warning: {}", err);
    assert!(!err.contains("secret not found"));
}
