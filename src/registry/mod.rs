//! Package registry (catalog) loading and lookup
//!
//! The registry is a JSON document listing every installable package, its
//! [`PackageType`], and one [`VersionRecord`] per buildable revision. It is
//! parsed once per run and never mutated afterwards.
//!
//! # Document Format
//!
//! Either a top-level array of packages or an object with a `Packages` array:
//!
//! ```json
//! {
//!   "Packages": [
//!     {
//!       "Name": "Foo",
//!       "Type": "Lib",
//!       "Versions": [
//!         {
//!           "Version": "1.0",
//!           "URL": "https://github.com/example/Foo.git",
//!           "Revision": "3f2a9c1",
//!           "Platform": "Linux",
//!           "Dependency": [
//!             { "Name": "Bar", "Version": "2.0", "LinkType": "Static" }
//!           ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `Type` is one of `Lib`, `Exec`, `Interface`, `Framework`. `LinkType` values
//! other than `Static` and `Dynamic` (or a missing `LinkType`) mark an edge
//! that carries no link requirement. `Platform` and `Dependency` are optional.
//!
//! # Lookup
//!
//! [`Registry::find`] is a linear scan in catalog order and versions match by
//! exact string equality; there is no range matching.

pub mod list;

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use strsim::levenshtein;

use crate::constants::{INTERFACE_DIR, PLATFORM_DIR, SIMILARITY_THRESHOLD_PERCENT};
use crate::core::MkpmError;

/// Kind of package, selecting the emitter that installs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PackageType {
    /// Static or shared library with its own sub-build
    #[serde(rename = "Lib")]
    Library,
    /// Application; same as a library plus `I_AM_APP=y`
    #[serde(rename = "Exec")]
    Executable,
    /// Header-only package, platform independent, no link requirement
    Interface,
    /// The base runtime, checked out directly under the install root
    Framework,
}

impl PackageType {
    /// Keyword used in the registry document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Library => "Lib",
            Self::Executable => "Exec",
            Self::Interface => "Interface",
            Self::Framework => "Framework",
        }
    }

    /// Human-readable label for log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Library => "Library",
            Self::Executable => "Executable",
            Self::Interface => "Interface",
            Self::Framework => "Framework",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a dependency edge is linked into the dependent package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum LinkType {
    /// Listed in `SLIBS`
    Static,
    /// Listed in `DLIBS`
    Dynamic,
    /// Ordering only (header/interface edge)
    #[default]
    None,
}

impl From<String> for LinkType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Static" => Self::Static,
            "Dynamic" => Self::Dynamic,
            _ => Self::None,
        }
    }
}

/// Platform constraint of a version record.
///
/// Only Linux selects a dedicated install subtree; every other value is kept
/// verbatim for listing but installs like an unconstrained package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Platform {
    /// Installed under `Packages/Platform/Linux`
    Linux,
    /// Any other platform string
    Other(String),
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        if value == "Linux" {
            Self::Linux
        } else {
            Self::Other(value)
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => f.write_str("Linux"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A dependency edge declared by a version record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependencyDeclaration {
    /// Target package name
    #[serde(rename = "Name")]
    pub name: String,
    /// Exact target version
    #[serde(rename = "Version")]
    pub version: String,
    /// Link classification of the edge
    #[serde(rename = "LinkType", default)]
    pub link: LinkType,
}

/// One buildable revision of a package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionRecord {
    /// Version string, matched exactly
    #[serde(rename = "Version")]
    pub version: String,
    /// Repository URL handed to the fetcher
    #[serde(rename = "URL")]
    pub url: String,
    /// Revision the checkout is hard-reset to
    #[serde(rename = "Revision")]
    pub revision: String,
    /// Optional platform constraint
    #[serde(rename = "Platform", default)]
    pub platform: Option<Platform>,
    /// Dependencies in declaration order
    #[serde(rename = "Dependency", default)]
    pub dependencies: Vec<DependencyDeclaration>,
}

/// A package and all of its versions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryEntry {
    /// Unique package name
    #[serde(rename = "Name")]
    pub name: String,
    /// Package kind
    #[serde(rename = "Type")]
    pub kind: PackageType,
    /// Versions in catalog order
    #[serde(rename = "Versions", default)]
    pub versions: Vec<VersionRecord>,
}

impl RegistryEntry {
    /// Find a version by exact string equality.
    #[must_use]
    pub fn find_version(&self, version: &str) -> Option<&VersionRecord> {
        self.versions.iter().find(|record| record.version == version)
    }
}

/// Read-only view of the whole catalog.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Build a registry from already-parsed entries.
    ///
    /// # Errors
    ///
    /// Returns [`MkpmError::RegistryValidationError`] if two entries share a
    /// name or an entry lists the same version twice.
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self> {
        let registry = Self {
            entries,
        };
        registry.validate()?;
        Ok(registry)
    }

    /// Load and validate a registry document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MkpmError::RegistryNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = crate::utils::fs::read_text_file(path)?;
        let entries = parse_document(&content).map_err(|reason| MkpmError::RegistryParseError {
            file: path.display().to_string(),
            reason,
        })?;

        tracing::debug!("Loaded {} package(s) from {}", entries.len(), path.display());
        Self::new(entries)
    }

    /// Parse a registry document held in memory.
    pub fn from_json(content: &str) -> Result<Self> {
        let entries = parse_document(content).map_err(|reason| MkpmError::RegistryParseError {
            file: "<inline>".to_string(),
            reason,
        })?;
        Self::new(entries)
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Find a package by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Package names close to `name`, best match first, at most three.
    #[must_use]
    pub fn suggest(&self, name: &str) -> Vec<String> {
        let mut scored: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|entry| (entry.name.as_str(), levenshtein(name, &entry.name)))
            .collect();

        scored.sort_by_key(|(_, dist)| *dist);

        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= name.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(candidate, _)| candidate.to_string())
            .collect()
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for entry in &self.entries {
            check_package_name(&entry.name)?;

            if !names.insert(entry.name.as_str()) {
                return Err(MkpmError::RegistryValidationError {
                    reason: format!("package '{}' is listed more than once", entry.name),
                }
                .into());
            }

            let mut versions = HashSet::new();
            for record in &entry.versions {
                if !versions.insert(record.version.as_str()) {
                    return Err(MkpmError::RegistryValidationError {
                        reason: format!(
                            "package '{}' lists version '{}' more than once",
                            entry.name, record.version
                        ),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// Package names become file and folder names under the install root, and
/// the payload folder is deleted before every fetch. A name must therefore be
/// a single plain path component that does not shadow a layout folder.
fn check_package_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("package name is empty")
    } else if name == "." || name == ".." {
        Some("package name is a relative path component")
    } else if name.contains(['/', '\\']) {
        Some("package name contains a path separator")
    } else if name.contains('\0') {
        Some("package name contains a NUL byte")
    } else if name == INTERFACE_DIR || name == PLATFORM_DIR {
        Some("package name is reserved for the install layout")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(MkpmError::RegistryValidationError {
            reason: format!("invalid package name '{name}': {reason}"),
        }
        .into()),
        None => Ok(()),
    }
}

/// Accept both the bare array layout and the `{ "Packages": [...] }` layout.
fn parse_document(content: &str) -> std::result::Result<Vec<RegistryEntry>, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let packages = match value {
        array @ serde_json::Value::Array(_) => array,
        serde_json::Value::Object(mut map) => map
            .remove("Packages")
            .ok_or_else(|| "expected a 'Packages' array at the top level".to_string())?,
        _ => return Err("expected an array of packages".to_string()),
    };

    serde_json::from_value(packages).map_err(|e| e.to_string())
}
