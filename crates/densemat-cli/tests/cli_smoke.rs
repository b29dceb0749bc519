//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `densemat` binary to verify that
//! argument parsing, output and error reporting work end-to-end.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("densemat").unwrap()
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("densemat"));
}

// ---------------------------------------------------------------------------
// demo / config
// ---------------------------------------------------------------------------

#[test]
fn demo_prints_showcase_result() {
    cmd()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("128.00 128.00\n168.00 168.00"));
}

#[test]
fn config_prints_json_template() {
    cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("parallel_threshold"))
        .stdout(predicate::str::contains("block_rows"));
}

// ---------------------------------------------------------------------------
// eval
// ---------------------------------------------------------------------------

#[test]
fn eval_add_with_broadcast_row() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n3 4\n");
    let b = write_file(&dir, "b.txt", "5 6\n");

    cmd()
        .args(["eval", "add"])
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout("6.00 8.00\n8.00 10.00\n");
}

#[test]
fn eval_matmul_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2 3\n4 5 6\n");
    let b = write_file(&dir, "b.txt", "7 8\n9 10\n11 12\n");
    let config = write_file(&dir, "config.json", r#"{"parallel_threshold": 0, "block_rows": 1}"#);
    let out = dir.path().join("c.txt");

    cmd()
        .args(["eval", "matmul"])
        .arg(&a)
        .arg(&b)
        .arg("--config")
        .arg(&config)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&out).unwrap(), "58.00 64.00\n139.00 154.00\n");
}

#[test]
fn eval_reads_stdin_and_negative_scalar() {
    cmd()
        .args(["eval", "mul", "-", "--scalar", "-2"])
        .write_stdin("1 -1\n")
        .assert()
        .success()
        .stdout("-2.00 2.00\n");
}

#[test]
fn eval_pow_and_transpose() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n3 4\n");

    cmd()
        .args(["eval", "pow"])
        .arg(&a)
        .args(["--exponent", "0"])
        .assert()
        .success()
        .stdout("1.00 1.00\n1.00 1.00\n");

    cmd()
        .args(["eval", "transpose"])
        .arg(&a)
        .assert()
        .success()
        .stdout("1.00 3.00\n2.00 4.00\n");
}

#[test]
fn eval_reports_ragged_input() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n3 4 5\n");

    cmd()
        .args(["eval", "transpose"])
        .arg(&a)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: expected 2 values, found 3"));
}

#[test]
fn eval_reports_shape_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n3 4\n");
    let b = write_file(&dir, "b.txt", "1 2 3\n");

    cmd()
        .args(["eval", "matmul"])
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot matmul shapes (2, 2) and (1, 3)"));
}

#[test]
fn eval_rejects_operand_the_operation_ignores() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n3 4\n");

    cmd()
        .args(["eval", "transpose"])
        .arg(&a)
        .args(["--scalar", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'transpose' does not take --scalar"));
}

#[test]
fn eval_rejects_unknown_operation() {
    cmd()
        .args(["eval", "divide", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
