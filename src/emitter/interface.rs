//! Interface (header-only) packages.
//!
//! Always installed under `Packages/Interface/<name>`, whatever the record's
//! platform. The fragment exports the include path and orders the package
//! after its dependencies; there is nothing to link.

use std::path::Path;

use super::InstallLayout;
use super::fragment::{write_include_export, write_phony_target};
use crate::constants::INTERFACE_DIR;
use crate::resolver::DependencySet;

/// Layout under `packages_dir` for an interface package.
pub fn layout(packages_dir: &Path, name: &str) -> InstallLayout {
    InstallLayout::new(packages_dir.join(INTERFACE_DIR), name, format!("{INTERFACE_DIR}/{name}"), true)
}

/// Render the fragment for an interface package.
pub fn render(name: &str, layout: &InstallLayout, deps: &DependencySet) -> String {
    let mut out = String::new();
    write_include_export(&mut out, &layout.relative);
    write_phony_target(&mut out, name, deps.names());
    out
}
