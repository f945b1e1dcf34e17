//! Tests for the command-line driver.
//!
//! These run the built binary against a temporary flags file.

use std::io::Write;
use std::process::Command;

const FLAGS: &str = r#"
[flags.foo]
long = "foo"
short = "f"
value = true

[flags.bar]
long = "bar"
short = "b"
"#;

fn flags_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FLAGS.as_bytes()).unwrap();
    file
}

fn healthy_options_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_healthy-options"));
    cmd.env_remove("HEALTHY_OPTIONS_LOG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_parses_tokens_to_json() {
    let file = flags_file();
    let output = healthy_options_cmd()
        .arg("--flags")
        .arg(file.path())
        .args(["--", "-bf5", "input.txt", "--bar"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(json["options"]["bar"], serde_json::json!(true));
    assert_eq!(json["options"]["foo"], serde_json::json!("5"));
    assert_eq!(json["remaining"], serde_json::json!(["input.txt", "--bar"]));
}

#[test]
fn test_text_format() {
    let file = flags_file();
    let output = healthy_options_cmd()
        .arg("-c")
        .arg(file.path())
        .args(["--format", "text", "--", "--foo", "x", "--", "-b"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("foo = x"));
    assert!(stdout.contains("remaining: -- -b"));
    assert!(!stdout.contains("bar = true"));
}

#[test]
fn test_parse_error_exits_with_error() {
    let file = flags_file();
    let output = healthy_options_cmd()
        .arg("--flags")
        .arg(file.path())
        .args(["--", "--foo"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: flag --foo needs a value"),
        "Expected missing value error, got: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_exits_with_error() {
    let file = flags_file();
    let output = healthy_options_cmd()
        .arg("--flags")
        .arg(file.path())
        .args(["--", "--nope"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized flag: --nope"));
}

#[test]
fn test_invalid_flags_file_exits_with_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[flags.foo]\nshort = \"ff\"\n").unwrap();

    let output = healthy_options_cmd()
        .arg("--flags")
        .arg(file.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load flag registry"));
}

#[test]
fn test_help_shows_flags_option() {
    let output = healthy_options_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--flags"));
    assert!(stdout.contains("--format"));
}
