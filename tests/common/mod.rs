//! Common test utilities for MKPM integration tests
//!
//! A [`TestProject`] owns a temporary directory with an install root, a folder
//! of package source repositories, and a registry file pointing at them.

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use mkpm_cli::test_utils::{PackageSpec, RegistryBuilder, create_package_repo};

/// True when a git executable is on PATH; git-backed tests return early
/// otherwise.
pub fn git_available() -> bool {
    mkpm_cli::utils::platform::command_exists("git")
}

/// Temporary install root plus package sources.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root_dir: PathBuf,
    sources_dir: PathBuf,
    registry_path: PathBuf,
}

impl TestProject {
    /// Create a new test project with empty root and sources folders
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_dir = temp_dir.path().join("root");
        let sources_dir = temp_dir.path().join("sources");
        let registry_path = temp_dir.path().join("Packages.json");

        fs::create_dir_all(&root_dir)?;
        fs::create_dir_all(&sources_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            root_dir,
            sources_dir,
            registry_path,
        })
    }

    /// Install root passed as `--path`
    pub fn root_path(&self) -> &Path {
        &self.root_dir
    }

    /// `<root>/Packages`
    pub fn packages_path(&self) -> PathBuf {
        self.root_dir.join("Packages")
    }

    /// Registry file passed as `--input`
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Write the registry document
    pub fn write_registry(&self, content: &str) -> Result<()> {
        fs::write(&self.registry_path, content)
            .with_context(|| format!("Failed to write registry to {:?}", self.registry_path))
    }

    /// Create a committed git repository for package `name` and return a
    /// `PackageSpec` of type `kind` pinned to that commit
    pub fn create_package(&self, name: &str, kind: &str, version: &str) -> Result<PackageSpec> {
        let repo = self.sources_dir.join(name);
        let sha = create_package_repo(&repo, name)?;
        let url = repo.display().to_string();
        Ok(PackageSpec::new(name, kind, version).source(&url, &sha))
    }

    /// Write `builder` as the registry
    pub fn write_builder(&self, builder: &RegistryBuilder) -> Result<()> {
        self.write_registry(&builder.to_json())
    }

    /// `mkpm` preconfigured with `--input` and `--path` for this project
    pub fn mkpm(&self) -> assert_cmd::Command {
        let mut cmd = mkpm_command();
        cmd.arg("--input").arg(&self.registry_path).arg("--path").arg(&self.root_dir);
        cmd
    }
}

/// `mkpm` with a clean, colorless environment
pub fn mkpm_command() -> assert_cmd::Command {
    let mut cmd = match assert_cmd::Command::cargo_bin("mkpm") {
        Ok(cmd) => cmd,
        Err(e) => panic!("mkpm binary not built: {e}"),
    };
    cmd.env_remove("RUST_LOG")
        .env_remove("MKPM_REGISTRY")
        .env_remove("MKPM_ROOT")
        .env("NO_COLOR", "1");
    cmd
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert a file exists
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert a file does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(!path.exists(), "Expected file to not exist: {}", path.display());
    }

    /// Assert a file contains specific content
    pub fn contains(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
        assert!(
            content.contains(expected),
            "Expected file {} to contain '{}'\nActual content: {}",
            path.display(),
            expected,
            content
        );
    }

    /// Assert a file has exact content
    pub fn equals(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
        assert_eq!(content, expected, "File {} content mismatch", path.display());
    }
}
