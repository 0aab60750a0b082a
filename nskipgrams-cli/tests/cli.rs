//! CLI integration tests for the `nskipgrams` binary.
//!
//! Uses `assert_cmd` to spawn the binary on a temporary input file and
//! assert on stdout/stderr/exit code.

use std::io::Write;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn nskipgrams_cmd() -> Command {
    Command::from(cargo_bin_cmd!("nskipgrams"))
}

fn input(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

// ---------------------------------------------------------------------------
// Basic CLI behavior
// ---------------------------------------------------------------------------

#[test]
fn help_flag() {
    nskipgrams_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("skip-grams"));
}

#[test]
fn missing_file_fails() {
    nskipgrams_cmd()
        .arg("/definitely/not/here.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn reads_stdin_when_input_is_dash() {
    nskipgrams_cmd()
        .arg("-")
        .write_stdin("abab\n")
        .assert()
        .success()
        .stdout("\"ab\"\t0\t2\n\"ba\"\t0\t1\n");
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

#[test]
fn counts_character_bigrams() {
    let file = input("abcdef\n");
    nskipgrams_cmd()
        .arg(file.path())
        .assert()
        .success()
        .stdout("\"ab\"\t0\t1\n\"bc\"\t0\t1\n\"cd\"\t0\t1\n\"de\"\t0\t1\n\"ef\"\t0\t1\n");
}

#[test]
fn skip_admits_gapped_pairs() {
    let file = input("abc\n");
    nskipgrams_cmd()
        .args(["--skip", "1"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ac\"\t1\t1"))
        .stdout(predicate::str::contains("\"ab\"\t0\t1"));
}

#[test]
fn lines_accumulate_and_sort_by_count() {
    let file = input("my cat\nyour cats\n");
    nskipgrams_cmd()
        .args(["--top", "1", "--prefix", " "])
        .arg(file.path())
        .assert()
        .success()
        .stdout("\" c\"\t0\t2\n");
}

#[test]
fn word_unit_and_order_filter() {
    let file = input("the rain in Spain\n");
    nskipgrams_cmd()
        .args(["--unit", "words", "--order", "3", "--show", "3"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("\"rain in Spain\"\t0\t1\n\"the rain in\"\t0\t1\n");
}

#[test]
fn at_skip_filter() {
    let file = input("abcd\n");
    nskipgrams_cmd()
        .args(["--skip", "2", "--at-skip", "2"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("\"ad\"\t2\t1\n");
}

// ---------------------------------------------------------------------------
// Invalid arguments
// ---------------------------------------------------------------------------

#[test]
fn zero_order_is_rejected() {
    let file = input("abc\n");
    nskipgrams_cmd()
        .args(["--order", "0"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max order must be an integer >= 1"));
}

#[test]
fn showing_beyond_max_order_is_rejected() {
    let file = input("abc\n");
    nskipgrams_cmd()
        .args(["--order", "2", "--show", "3"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("order 3 is outside of [1, 2]"));
}

#[test]
fn blank_word_prefix_is_rejected() {
    let file = input("the rain in Spain\n");
    nskipgrams_cmd()
        .args(["--unit", "words", "--prefix", "   "])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains no element to match"));
}
