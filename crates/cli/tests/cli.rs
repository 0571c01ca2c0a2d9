//! End-to-end tests driving the built binary: the hello-world, self-send,
//! stack-math, string-concat, skip, and spawn/send scenarios, plus the
//! usage-error paths (missing script, unreadable script, unrecognized
//! trailing argument).

use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp script");
    write!(file, "{contents}").expect("write temp script");
    file
}

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_seq2d"))
}

#[test]
fn hello_world() {
    let file = script("\"Hello, World!\":o;");
    let output = bin().arg(file.path()).output().expect("run binary");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello, World!");
}

#[test]
fn self_send() {
    let file = script("42\"hi\"@;");
    let output = bin().arg(file.path()).output().expect("run binary");
    assert!(output.status.success());
}

#[test]
fn stack_math_via_seed() {
    let file = script("+o;");
    let output = bin()
        .arg(file.path())
        .args(["-s", "3", "4"])
        .output()
        .expect("run binary");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "7");
}

#[test]
fn string_concat_via_seed() {
    let file = script(".o;");
    let output = bin()
        .arg(file.path())
        .args(["-s", "abc", "def"])
        .output()
        .expect("run binary");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "abcdef");
}

#[test]
fn skip_instruction() {
    let file = script("1!+2o;");
    let output = bin()
        .arg(file.path())
        .args(["-s", "5"])
        .output()
        .expect("run binary");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2");
}

#[test]
fn missing_script_argument_is_a_usage_error() {
    let output = bin().output().expect("run binary");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Usage:"));
}

#[test]
fn unreadable_script_is_a_runtime_error() {
    let output = bin()
        .arg("/nonexistent/path/to/a/script.seq")
        .output()
        .expect("run binary");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}

#[test]
fn unrecognized_trailing_argument_is_a_usage_error() {
    let file = script(";");
    let output = bin()
        .arg(file.path())
        .arg("--not-a-flag")
        .output()
        .expect("run binary");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Usage:"));
}

#[test]
fn seed_accepts_a_numeric_value() {
    let file = script(";");
    let output = bin()
        .arg(file.path())
        .args(["--seed", "12345"])
        .output()
        .expect("run binary");
    assert!(output.status.success());
}
