//! Install manifests (`<name>.json`)
//!
//! Every installed package gets a small JSON record next to its payload
//! directory:
//!
//! ```json
//! {"name":"Foo","Version":"1.0"}
//! ```
//!
//! The manifest only answers "is this version already materialized here?".
//! It is never used to rebuild the dependency graph. A missing, unreadable or
//! corrupt manifest means "not installed" and is never an error.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::MANIFEST_EXTENSION;
use crate::utils::fs::{read_json_file, write_json_file};

/// On-disk record of which version of a package is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledManifest {
    /// Package name
    pub name: String,
    /// Installed version
    #[serde(rename = "Version")]
    pub version: String,
}

impl InstalledManifest {
    /// Create a manifest for `name` at `version`.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Location of the manifest for `name` inside an install folder.
    #[must_use]
    pub fn path_in(folder: &Path, name: &str) -> PathBuf {
        folder.join(format!("{name}.{MANIFEST_EXTENSION}"))
    }

    /// Read and parse a manifest file.
    pub fn read(path: &Path) -> Result<Self> {
        read_json_file(path)
    }

    /// Write the manifest atomically, replacing any previous one.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_json_file(path, self, false)
    }
}

/// Returns true if the manifest at `path` records exactly `version`.
///
/// Any failure to read or parse the manifest is logged and reported as
/// "not installed".
#[must_use]
pub fn is_installed(path: &Path, version: &str) -> bool {
    match InstalledManifest::read(path) {
        Ok(manifest) => manifest.version == version,
        Err(e) => {
            debug!("No usable manifest at {}: {e:#}", path.display());
            false
        }
    }
}
