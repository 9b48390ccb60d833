//! Libraries and executables.
//!
//! Both install under `Packages/` (or `Packages/Platform/Linux/` for records
//! constrained to Linux) and build through the package's own Makefile. The
//! fragment passes the static and dynamic link sets down to that sub-build;
//! the base runtime is always the first dynamic library.

use std::fmt::Write;
use std::path::Path;

use super::InstallLayout;
use super::fragment::{write_include_export, write_phony_target};
use crate::constants::{BASE_RUNTIME, LINUX_DIR, PACKAGES_DIR, PLATFORM_DIR};
use crate::registry::{Platform, VersionRecord};
use crate::resolver::DependencySet;

/// Layout under `packages_dir` for a library or executable.
pub fn layout(packages_dir: &Path, name: &str, record: &VersionRecord) -> InstallLayout {
    match record.platform {
        Some(Platform::Linux) => InstallLayout::new(
            packages_dir.join(PLATFORM_DIR).join(LINUX_DIR),
            name,
            format!("{PLATFORM_DIR}/{LINUX_DIR}/{name}"),
            true,
        ),
        _ => InstallLayout::new(packages_dir.to_path_buf(), name, name.to_string(), true),
    }
}

/// Render the fragment for a library (`is_app == false`) or executable.
pub fn render(name: &str, layout: &InstallLayout, deps: &DependencySet, is_app: bool) -> String {
    let rel = &layout.relative;
    let mut out = String::new();

    write_include_export(&mut out, &format!("{rel}/Inc"));
    write_phony_target(&mut out, name, deps.names());

    let mut dynamic = vec![BASE_RUNTIME.to_string()];
    dynamic.extend(deps.dynamic_libs().iter().cloned());

    let _ = writeln!(out, "\t@$(MAKE) -f $(PACKAGES)/{rel}/Makefile \\");
    let _ = writeln!(out, "\t\tPKG_PATH={PACKAGES_DIR}/{rel} \\");
    let _ = writeln!(out, "\t\tPKG_NAME={name} \\");
    let _ = writeln!(out, "\t\tSLIBS=\"{}\" \\", deps.static_libs().join(" "));
    let _ = writeln!(out, "\t\tDLIBS=\"{}\" \\", dynamic.join(" "));
    if is_app {
        let _ = writeln!(out, "\t\tI_AM_APP=y \\");
    }
    let _ = writeln!(out, "\t\tall");

    out
}
