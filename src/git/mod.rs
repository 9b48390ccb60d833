//! Source fetching
//!
//! The resolver never runs git itself; it asks a [`Fetcher`] to materialize a
//! package's source tree. [`GitFetcher`] is the production implementation: a
//! plain `git clone` followed by `git reset --hard <revision>`, so any URL git
//! understands (https, ssh, local paths) works.
//!
//! Failures are not retried and nothing is rolled back; the error travels up
//! to the CLI and ends the run.

pub mod command_builder;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::core::MkpmError;
use crate::utils::platform::{command_exists, get_git_command};
use command_builder::GitCommand;

/// Materializes one revision of a repository at a path.
pub trait Fetcher {
    /// Create `dest` containing exactly `revision` of the repository at `url`.
    ///
    /// `dest` does not exist when this is called; its parent does.
    fn fetch(&self, url: &str, revision: &str, dest: &Path) -> Result<()>;
}

/// [`Fetcher`] backed by the system git executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitFetcher;

impl GitFetcher {
    /// Creates a new git fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Clone `url` into `dest` without pinning a revision.
    ///
    /// Used for the default catalog, which always tracks its default branch.
    pub fn clone_latest(&self, url: &str, dest: &Path) -> Result<()> {
        ensure_git_available()?;
        GitCommand::clone(url, dest).execute_success()
    }

    /// Fast-forward an existing checkout.
    pub fn update(&self, repo: &Path) -> Result<()> {
        ensure_git_available()?;
        GitCommand::pull().current_dir(repo).execute_success()
    }
}

impl Fetcher for GitFetcher {
    fn fetch(&self, url: &str, revision: &str, dest: &Path) -> Result<()> {
        ensure_git_available()?;

        let label = dest
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| dest.display().to_string());

        GitCommand::clone(url, dest)
            .with_context(label.clone())
            .execute_success()
            .with_context(|| format!("Failed to fetch {label} from {url}"))?;

        GitCommand::reset_hard(revision)
            .current_dir(dest)
            .with_context(label.clone())
            .execute_success()
            .with_context(|| format!("Failed to pin {label} to revision {revision}"))?;

        debug!("Fetched {label} at {revision}");
        Ok(())
    }
}

/// Fail early with [`MkpmError::GitNotFound`] when git is not on PATH.
pub fn ensure_git_available() -> Result<()> {
    if command_exists(get_git_command()) {
        Ok(())
    } else {
        Err(MkpmError::GitNotFound.into())
    }
}
