//! Type-specific install strategies
//!
//! An [`Emitter`] decides, for one resolved package, where its source goes,
//! whether its dependency declarations are followed, what make fragment it
//! gets, and which dependency set is handed back to the package that required
//! it.
//!
//! | Emitter | Payload | Recurses | Fragment | Returned set |
//! |---|---|---|---|---|
//! | Library / Executable | `Packages/[Platform/Linux/]<name>` | yes | `SLIBS`/`DLIBS` recipe | its own |
//! | Interface | `Packages/Interface/<name>` | yes | include + phony only | empty |
//! | Framework | `<root>/EasyCpp` | no | none | empty |
//!
//! [`install`] runs the shared procedure: manifest check, payload removal,
//! fetch, manifest rewrite, fragment write.

pub mod fragment;
pub mod framework;
pub mod interface;
pub mod library;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::constants::FRAGMENT_EXTENSION;
use crate::git::Fetcher;
use crate::manifest::{self, InstalledManifest};
use crate::registry::{PackageType, VersionRecord};
use crate::resolver::{DependencySet, InstallContext};
use crate::utils::fs::{ensure_dir, remove_dir_all, safe_write};

/// Where one package's files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Folder holding the payload, manifest and fragment
    pub folder: PathBuf,
    /// Source checkout
    pub payload: PathBuf,
    /// `<name>.json`
    pub manifest: PathBuf,
    /// `<name>.mk`, if the package gets one
    pub fragment: Option<PathBuf>,
    /// Payload path relative to the packages folder, as written into fragments
    pub relative: String,
}

impl InstallLayout {
    /// Payload, manifest and fragment named after the package inside `folder`.
    pub fn new(folder: PathBuf, name: &str, relative: String, with_fragment: bool) -> Self {
        let fragment = with_fragment.then(|| folder.join(format!("{name}.{FRAGMENT_EXTENSION}")));
        Self {
            payload: folder.join(name),
            manifest: InstalledManifest::path_in(&folder, name),
            fragment,
            relative,
            folder,
        }
    }
}

/// Install strategy selected by [`PackageType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitter {
    /// Library, or executable when `is_app`
    Library {
        /// Adds `I_AM_APP=y` to the sub-build
        is_app: bool,
    },
    /// Header-only package
    Interface,
    /// Base runtime
    Framework,
}

/// What [`install`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Manifest already recorded the requested version
    Skipped,
    /// Source fetched and files (re)written
    Installed,
}

impl Emitter {
    /// Emitter for a package type.
    #[must_use]
    pub const fn for_type(kind: PackageType) -> Self {
        match kind {
            PackageType::Library => Self::Library {
                is_app: false,
            },
            PackageType::Executable => Self::Library {
                is_app: true,
            },
            PackageType::Interface => Self::Interface,
            PackageType::Framework => Self::Framework,
        }
    }

    /// Whether the package's dependency declarations are resolved.
    #[must_use]
    pub const fn follows_dependencies(self) -> bool {
        !matches!(self, Self::Framework)
    }

    /// Install location for `name` at `record`.
    #[must_use]
    pub fn layout(self, context: &InstallContext, name: &str, record: &VersionRecord) -> InstallLayout {
        match self {
            Self::Library { .. } => library::layout(&context.packages_dir(), name, record),
            Self::Interface => interface::layout(&context.packages_dir(), name),
            Self::Framework => framework::layout(&context.root, name),
        }
    }

    /// Fragment text, or `None` for packages without one.
    #[must_use]
    pub fn render(self, name: &str, layout: &InstallLayout, deps: &DependencySet) -> Option<String> {
        match self {
            Self::Library {
                is_app,
            } => Some(library::render(name, layout, deps, is_app)),
            Self::Interface => Some(interface::render(name, layout, deps)),
            Self::Framework => None,
        }
    }

    /// The set handed back to the dependent package.
    #[must_use]
    pub fn exported(self, deps: DependencySet) -> DependencySet {
        match self {
            Self::Library { .. } => deps,
            Self::Interface | Self::Framework => DependencySet::new(),
        }
    }
}

/// Install one resolved package unless its manifest already records the
/// requested version.
///
/// With `context.force` the manifest is not consulted. Otherwise the payload
/// is deleted, fetched again, the manifest rewritten and the fragment
/// regenerated, in that order. A fetch failure aborts before the manifest is
/// touched.
pub fn install(
    emitter: Emitter,
    context: &InstallContext,
    fetcher: &dyn Fetcher,
    name: &str,
    record: &VersionRecord,
    deps: &DependencySet,
) -> Result<InstallOutcome> {
    let layout = emitter.layout(context, name, record);

    if !context.force && manifest::is_installed(&layout.manifest, &record.version) {
        info!("{} is already in version: {}", name, record.version);
        return Ok(InstallOutcome::Skipped);
    }

    ensure_dir(&layout.folder)?;
    remove_dir_all(&layout.payload)?;

    debug!("Fetching {} from {} at {}", name, record.url, record.revision);
    fetcher
        .fetch(&record.url, &record.revision, &layout.payload)
        .with_context(|| format!("Failed to install {}({})", name, record.version))?;

    InstalledManifest::new(name, &record.version).write(&layout.manifest)?;

    if let (Some(path), Some(text)) = (&layout.fragment, emitter.render(name, &layout, deps)) {
        safe_write(path, &text)
            .with_context(|| format!("Failed to write build fragment for {name}"))?;
        debug!("Wrote {}", path.display());
    }

    Ok(InstallOutcome::Installed)
}
