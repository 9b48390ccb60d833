use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_list_prints_catalog_tree() {
    let project = TestProject::new().unwrap();
    project
        .write_registry(
            r#"[
                {"Name": "Foo", "Type": "Lib", "Versions": [
                    {"Version": "1.0", "URL": "u", "Revision": "r",
                     "Dependency": [{"Name": "Bar", "Version": "2.0", "LinkType": "Static"}]}
                ]},
                {"Name": "Bar", "Type": "Lib", "Versions": [
                    {"Version": "2.0", "URL": "u", "Revision": "r", "Platform": "Linux"}
                ]}
            ]"#,
        )
        .unwrap();

    project
        .mkpm()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("+ Foo\n|    Type: Lib\n"))
        .stdout(predicate::str::contains("|  |  |   Depends on: Bar(2.0)\n"))
        .stdout(predicate::str::contains("|  |  |   Platform: Linux\n"));

    // Listing never installs
    assert!(!project.packages_path().exists());
}

#[test]
fn test_list_empty_registry() {
    let project = TestProject::new().unwrap();
    project.write_registry(r#"{"Packages": []}"#).unwrap();

    project.mkpm().arg("-l").assert().success().stdout(predicate::str::is_empty());
}
