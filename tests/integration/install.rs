use predicates::prelude::*;
use std::fs;

use mkpm_cli::test_utils::RegistryBuilder;

use crate::common::{FileAssert, TestProject, git_available};

/// Foo(1.0) depends statically on Bar(2.0); both are real git repositories.
fn foo_bar_project() -> TestProject {
    let project = TestProject::new().unwrap();
    let foo = project.create_package("Foo", "Lib", "1.0").unwrap().dep("Bar", "2.0", "Static");
    let bar = project.create_package("Bar", "Lib", "2.0").unwrap();
    project.write_builder(&RegistryBuilder::new().add(foo).add(bar)).unwrap();
    project
}

#[test]
fn test_install_with_dependency() {
    if !git_available() {
        return;
    }
    mkpm_cli::test_utils::init_test_logging(None);
    let project = foo_bar_project();

    project
        .mkpm()
        .args(["-a", "Foo/1.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Install package(Library): Bar(2.0)"))
        .stderr(predicate::str::contains("Install package(Library): Foo(1.0)"));

    let packages = project.packages_path();
    FileAssert::exists(packages.join("Foo").join("Inc").join("Foo.h"));
    FileAssert::exists(packages.join("Bar").join("Makefile"));
    FileAssert::equals(packages.join("Foo.json"), r#"{"name":"Foo","Version":"1.0"}"#);
    FileAssert::equals(packages.join("Bar.json"), r#"{"name":"Bar","Version":"2.0"}"#);

    FileAssert::contains(packages.join("Foo.mk"), "Foo: Bar\n");
    FileAssert::contains(packages.join("Foo.mk"), "SLIBS=\"Bar\"");
    FileAssert::contains(packages.join("Foo.mk"), "DLIBS=\"EasyCpp\"");
    FileAssert::contains(packages.join("Bar.mk"), "Bar:\n");
    FileAssert::contains(packages.join("Bar.mk"), "SLIBS=\"\"");
}

#[test]
fn test_second_run_skips_installed_packages() {
    if !git_available() {
        return;
    }
    let project = foo_bar_project();
    project.mkpm().args(["-a", "Foo/1.0"]).assert().success();

    let manifest = project.packages_path().join("Foo.json");
    let before = fs::read(&manifest).unwrap();
    let marker = project.packages_path().join("Foo").join("local.txt");
    fs::write(&marker, "keep").unwrap();

    project
        .mkpm()
        .args(["-a", "Foo/1.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Foo is already in version: 1.0"))
        .stderr(predicate::str::contains("Bar is already in version: 2.0"));

    assert_eq!(fs::read(&manifest).unwrap(), before);
    FileAssert::exists(&marker);
}

#[test]
fn test_force_reinstalls() {
    if !git_available() {
        return;
    }
    let project = foo_bar_project();
    project.mkpm().args(["-a", "Foo/1.0"]).assert().success();

    let marker = project.packages_path().join("Foo").join("local.txt");
    fs::write(&marker, "stale").unwrap();

    project
        .mkpm()
        .args(["--force", "-a", "Foo/1.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("already in version").not());

    FileAssert::not_exists(&marker);
    FileAssert::exists(project.packages_path().join("Foo").join("Makefile"));
}

#[test]
fn test_quiet_suppresses_progress() {
    if !git_available() {
        return;
    }
    let project = foo_bar_project();

    project
        .mkpm()
        .args(["--quiet", "-a", "Foo/1.0"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    FileAssert::exists(project.packages_path().join("Foo.mk"));
}

#[test]
fn test_install_layouts_by_type() {
    if !git_available() {
        return;
    }
    let project = TestProject::new().unwrap();
    let app = project
        .create_package("App", "Exec", "1.0")
        .unwrap()
        .dep("Hdr", "1.0", "None")
        .dep("Drv", "1.0", "Dynamic");
    let hdr = project.create_package("Hdr", "Interface", "1.0").unwrap();
    let drv = project.create_package("Drv", "Lib", "1.0").unwrap().platform("Linux");
    let core = project.create_package("Core", "Framework", "1.0").unwrap();
    project
        .write_builder(&RegistryBuilder::new().add(app).add(hdr).add(drv).add(core))
        .unwrap();

    project.mkpm().args(["-a", "Core/1.0", "-a", "App/1.0"]).assert().success();

    let root = project.root_path();
    let packages = project.packages_path();

    FileAssert::exists(root.join("EasyCpp").join("Makefile"));
    FileAssert::equals(root.join("Core.json"), r#"{"name":"Core","Version":"1.0"}"#);
    FileAssert::not_exists(root.join("Core.mk"));

    FileAssert::exists(packages.join("Interface").join("Hdr").join("Makefile"));
    FileAssert::contains(packages.join("Interface").join("Hdr.mk"), "-I $(PACKAGES)/Interface/Hdr\n");

    let linux = packages.join("Platform").join("Linux");
    FileAssert::exists(linux.join("Drv").join("Makefile"));
    FileAssert::contains(linux.join("Drv.mk"), "PKG_PATH=Packages/Platform/Linux/Drv");

    let app_mk = packages.join("App.mk");
    FileAssert::contains(&app_mk, "App: Hdr Drv\n");
    FileAssert::contains(&app_mk, "DLIBS=\"EasyCpp Drv\"");
    FileAssert::contains(&app_mk, "SLIBS=\"\"");
    FileAssert::contains(&app_mk, "I_AM_APP=y");
}

#[test]
fn test_registry_and_root_from_environment() {
    if !git_available() {
        return;
    }
    let project = foo_bar_project();

    crate::common::mkpm_command()
        .env("MKPM_REGISTRY", project.registry_path())
        .env("MKPM_ROOT", project.root_path())
        .args(["-a", "Bar/2.0"])
        .assert()
        .success();

    FileAssert::exists(project.packages_path().join("Bar.mk"));
    FileAssert::not_exists(project.packages_path().join("Foo.mk"));
}
