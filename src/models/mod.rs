//! Shared data models for MKPM operations

use std::fmt;
use std::str::FromStr;

use crate::core::MkpmError;

/// A top-level install request in `name/version` form.
///
/// The first `/` separates the name from the version; the version may itself
/// contain `/`.
///
/// # Examples
///
/// ```rust
/// use mkpm_cli::models::PackageRequest;
///
/// let request: PackageRequest = "Foo/1.0".parse().unwrap();
/// assert_eq!(request.name, "Foo");
/// assert_eq!(request.version, "1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Package name
    pub name: String,
    /// Exact version
    pub version: String,
}

impl PackageRequest {
    /// Creates a request.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl FromStr for PackageRequest {
    type Err = MkpmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| MkpmError::InvalidRequest {
            request: s.to_string(),
            reason: reason.to_string(),
        };

        let (name, version) = s.split_once('/').ok_or_else(|| invalid("missing '/version'"))?;
        let (name, version) = (name.trim(), version.trim());

        if name.is_empty() {
            return Err(invalid("package name is empty"));
        }
        if version.is_empty() {
            return Err(invalid("version is empty"));
        }

        Ok(Self::new(name, version))
    }
}

impl fmt::Display for PackageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}
