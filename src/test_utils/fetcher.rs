//! [`Fetcher`] doubles for resolver tests.

use anyhow::{Result, bail};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::git::Fetcher;

/// One recorded fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    /// Repository URL
    pub url: String,
    /// Pinned revision
    pub revision: String,
    /// Destination directory
    pub dest: PathBuf,
}

/// Records every fetch and creates the destination with a `REVISION` file.
#[derive(Debug, Default)]
pub struct RecordingFetcher {
    calls: RefCell<Vec<FetchCall>>,
}

impl RecordingFetcher {
    /// Creates a fetcher with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// All fetches so far, in order.
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.borrow().clone()
    }

    /// Number of fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Final path component of every destination, in fetch order.
    pub fn fetched_names(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| call.dest.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect()
    }

    /// Forget recorded calls.
    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Fetcher for RecordingFetcher {
    fn fetch(&self, url: &str, revision: &str, dest: &Path) -> Result<()> {
        std::fs::create_dir_all(dest)?;
        std::fs::write(dest.join("REVISION"), revision)?;
        self.calls.borrow_mut().push(FetchCall {
            url: url.to_string(),
            revision: revision.to_string(),
            dest: dest.to_path_buf(),
        });
        Ok(())
    }
}

/// Fails every fetch, like an unreachable remote.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingFetcher;

impl Fetcher for FailingFetcher {
    fn fetch(&self, url: &str, _revision: &str, _dest: &Path) -> Result<()> {
        bail!("could not reach {url}")
    }
}
