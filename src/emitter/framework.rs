//! The framework package: the base runtime every library links against.
//!
//! It lives directly under the install root in a folder named after the base
//! runtime rather than the package, keeps its manifest next to that folder,
//! and has no fragment.

use std::path::Path;

use super::InstallLayout;
use crate::constants::BASE_RUNTIME;
use crate::manifest::InstalledManifest;

/// Layout under the install root for the framework package.
pub fn layout(root: &Path, name: &str) -> InstallLayout {
    InstallLayout {
        folder: root.to_path_buf(),
        payload: root.join(BASE_RUNTIME),
        manifest: InstalledManifest::path_in(root, name),
        fragment: None,
        relative: BASE_RUNTIME.to_string(),
    }
}
