use predicates::prelude::*;

use crate::common::TestProject;

fn project_with_foo() -> TestProject {
    let project = TestProject::new().unwrap();
    project
        .write_registry(
            r#"{"Packages": [{"Name": "Foo", "Type": "Lib", "Versions": [
                {"Version": "1.0", "URL": "/nonexistent/Foo", "Revision": "abc"}
            ]}]}"#,
        )
        .unwrap();
    project
}

#[test]
fn test_missing_registry_file() {
    let project = TestProject::new().unwrap();

    project
        .mkpm()
        .args(["-a", "Foo/1.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Registry file not found"));
}

#[test]
fn test_malformed_registry() {
    let project = TestProject::new().unwrap();
    project.write_registry("{ not json").unwrap();

    project
        .mkpm()
        .arg("--list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid registry file syntax"));
}

#[test]
fn test_unknown_type_is_rejected() {
    let project = TestProject::new().unwrap();
    project
        .write_registry(r#"[{"Name": "Foo", "Type": "Plugin", "Versions": []}]"#)
        .unwrap();

    project.mkpm().arg("--list").assert().code(1);
}

#[test]
fn test_unknown_package_is_silent_by_default() {
    let project = project_with_foo();

    project.mkpm().args(["-a", "Nope/1.0"]).assert().success();
    assert!(!project.packages_path().join("Nope.mk").exists());
}

#[test]
fn test_unknown_package_warns() {
    let project = project_with_foo();

    project
        .mkpm()
        .args(["--on-missing", "warn", "-a", "Fooo/1.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("did you mean: Foo"));
}

#[test]
fn test_unknown_package_fails_with_error_policy() {
    let project = project_with_foo();

    project
        .mkpm()
        .args(["--on-missing", "error", "-a", "Fooo/1.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Package 'Fooo' not found in registry"))
        .stderr(predicate::str::contains("Foo"));
}

#[test]
fn test_unknown_version_fails_with_error_policy() {
    let project = project_with_foo();

    project
        .mkpm()
        .args(["--on-missing", "error", "-a", "Foo/2.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Version '2.0' not found for package 'Foo'"))
        .stderr(predicate::str::contains("1.0"));
}

#[test]
fn test_fetch_failure_exits_one() {
    if !crate::common::git_available() {
        return;
    }
    let project = project_with_foo();

    project
        .mkpm()
        .args(["-a", "Foo/1.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Foo"));
    assert!(!project.packages_path().join("Foo.json").exists());
}

#[test]
fn test_cycle_fails() {
    let project = TestProject::new().unwrap();
    project
        .write_registry(
            r#"[
                {"Name": "A", "Type": "Lib", "Versions": [{"Version": "1", "URL": "u", "Revision": "r",
                    "Dependency": [{"Name": "B", "Version": "1"}]}]},
                {"Name": "B", "Type": "Lib", "Versions": [{"Version": "1", "URL": "u", "Revision": "r",
                    "Dependency": [{"Name": "A", "Version": "1"}]}]}
            ]"#,
        )
        .unwrap();

    project
        .mkpm()
        .args(["-a", "A/1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("A(1) -> B(1) -> A(1)"));
}

#[test]
fn test_path_like_package_name_is_rejected() {
    let project = TestProject::new().unwrap();
    let outside = project.root_path().join("precious");
    std::fs::create_dir_all(&outside).unwrap();
    std::fs::write(outside.join("data"), "keep").unwrap();
    project
        .write_registry(
            r#"[{"Name": "../precious", "Type": "Lib", "Versions": [
                {"Version": "1", "URL": "u", "Revision": "r"}
            ]}]"#,
        )
        .unwrap();

    project
        .mkpm()
        .args(["-a", "../precious/1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid package name '../precious'"));

    assert!(outside.join("data").is_file());
}

#[test]
fn test_empty_package_name_is_rejected() {
    let project = TestProject::new().unwrap();
    project
        .write_registry(r#"[{"Name": "", "Type": "Lib", "Versions": []}]"#)
        .unwrap();

    project
        .mkpm()
        .arg("--list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package name is empty"));
}
