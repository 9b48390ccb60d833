//! Global constants used throughout the MKPM codebase.
//!
//! Folder names and file extensions of the install layout, the base runtime
//! every library links against, and the default catalog location.

/// Folder under the install root that holds every non-framework package.
pub const PACKAGES_DIR: &str = "Packages";

/// Folder under [`PACKAGES_DIR`] for interface (header-only) packages.
pub const INTERFACE_DIR: &str = "Interface";

/// Folder under [`PACKAGES_DIR`] for platform-specific packages.
pub const PLATFORM_DIR: &str = "Platform";

/// Folder under [`PLATFORM_DIR`] for packages constrained to Linux.
pub const LINUX_DIR: &str = "Linux";

/// Name of the base runtime library.
///
/// The framework package is checked out into a folder of this name directly
/// under the install root, and every library fragment lists it first in `DLIBS`.
pub const BASE_RUNTIME: &str = "EasyCpp";

/// Extension of the per-package install manifest.
pub const MANIFEST_EXTENSION: &str = "json";

/// Extension of the per-package build fragment.
pub const FRAGMENT_EXTENSION: &str = "mk";

/// Repository holding the default catalog, cloned when no `--input` is given.
pub const DEFAULT_REGISTRY_URL: &str = "https://github.com/jackygx/PackageManager.git";

/// Folder under the install root the default catalog is cloned into.
pub const DEFAULT_REGISTRY_DIR: &str = "Configuration";

/// Catalog file inside [`DEFAULT_REGISTRY_DIR`].
pub const DEFAULT_REGISTRY_FILE: &str = "Packages.json";

/// Maximum Levenshtein distance, as a percentage of the target length, for
/// "did you mean" suggestions on unknown package names.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
