//! End-to-end tests for the `completions` command.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("docpub");

    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_docpub()"))
        .stdout(predicate::str::contains("add-version"));
}

#[test]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("docpub");

    cmd.args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef docpub"));
}

#[test]
fn test_completions_fish() {
    let mut cmd = cargo_bin_cmd!("docpub");

    cmd.args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c docpub"));
}

#[test]
fn test_completions_unknown_shell() {
    let mut cmd = cargo_bin_cmd!("docpub");

    cmd.args(["completions", "tcsh"]).assert().code(2);
}
