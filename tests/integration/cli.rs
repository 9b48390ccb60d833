use predicates::prelude::*;

use crate::common::mkpm_command;

#[test]
fn test_help_lists_flags() {
    mkpm_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--add"))
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--list"))
        .stdout(predicate::str::contains("--on-missing"));
}

#[test]
fn test_short_help() {
    mkpm_command().arg("-h").assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_version() {
    mkpm_command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_malformed_request_is_usage_error() {
    mkpm_command()
        .args(["-i", "Packages.json", "-a", "Foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid package request 'Foo'"));
}

#[test]
fn test_unknown_flag_fails() {
    mkpm_command().arg("--bogus").assert().failure();
}
