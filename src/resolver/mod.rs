//! Recursive package resolution
//!
//! [`Resolver::resolve`] turns a `(name, version)` request into installed
//! packages and build fragments:
//!
//! 1. Look the package up in the [`Registry`] (exact version match)
//! 2. Resolve every declared dependency first, depth-first, in declaration
//!    order, collecting the [`DependencySet`] each child returns
//! 3. Hand the package and its collected set to the [`Emitter`] for its type
//!
//! # Lookup Misses
//!
//! A request the registry cannot satisfy is, by default, skipped without
//! error: the catalog uses this for optional dependencies. [`MissPolicy`]
//! makes misses visible (`Warn`) or fatal (`Error`) for catalogs where a miss
//! is more likely a typo.
//!
//! # Diamonds and Cycles
//!
//! There is no global "already resolved" set. A package reached through two
//! paths is resolved, checked and emitted twice; the second time normally
//! finds its manifest current and skips the fetch. Cycles are detected on
//! the active resolution path and reported as
//! [`MkpmError::CircularDependency`].
//!
//! # Example
//!
//! ```rust,no_run
//! use mkpm_cli::git::GitFetcher;
//! use mkpm_cli::registry::Registry;
//! use mkpm_cli::resolver::{InstallContext, Resolver};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let registry = Registry::load(Path::new("Packages.json"))?;
//! let context = InstallContext::new(".");
//! let fetcher = GitFetcher::new();
//!
//! let resolver = Resolver::new(&registry, &context, &fetcher);
//! resolver.resolve("Foo", "1.0")?;
//! # Ok(())
//! # }
//! ```

mod dependency_set;


pub use dependency_set::DependencySet;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::PACKAGES_DIR;
use crate::core::MkpmError;
use crate::emitter::{self, Emitter, InstallOutcome};
use crate::git::Fetcher;
use crate::models::PackageRequest;
use crate::registry::{Registry, RegistryEntry, VersionRecord};

/// How a request the registry cannot satisfy is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MissPolicy {
    /// Skip silently (debug log only)
    #[default]
    Ignore,
    /// Skip with a warning and close-match suggestions
    Warn,
    /// Fail the run
    Error,
}

/// Immutable settings shared by every frame of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallContext {
    /// Install root; `Packages/` and the framework folder live here
    pub root: PathBuf,
    /// Re-fetch even when the manifest records the requested version
    pub force: bool,
    /// Handling of lookup misses
    pub on_missing: MissPolicy,
}

impl InstallContext {
    /// Context for `root` with default settings.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            force: false,
            on_missing: MissPolicy::default(),
        }
    }

    /// Set the force flag.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Set the miss policy.
    #[must_use]
    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.on_missing = policy;
        self
    }

    /// `<root>/Packages`
    #[must_use]
    pub fn packages_dir(&self) -> PathBuf {
        self.root.join(PACKAGES_DIR)
    }
}

/// Result of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not in the registry; nothing was done
    Missing,
    /// Found and already at the requested version
    Skipped(DependencySet),
    /// Found and (re)installed
    Installed(DependencySet),
}

impl Resolution {
    /// The set to merge into the caller's; empty for [`Resolution::Missing`].
    #[must_use]
    pub fn into_dependencies(self) -> DependencySet {
        match self {
            Self::Missing => DependencySet::new(),
            Self::Skipped(deps) | Self::Installed(deps) => deps,
        }
    }

    /// True for [`Resolution::Missing`].
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Depth-first resolver over an immutable registry.
pub struct Resolver<'a> {
    registry: &'a Registry,
    context: &'a InstallContext,
    fetcher: &'a dyn Fetcher,
}

/// `(name, version)` pairs on the current resolution path, root first.
type ResolutionPath = Vec<(String, String)>;

impl<'a> Resolver<'a> {
    /// Creates a resolver.
    pub fn new(registry: &'a Registry, context: &'a InstallContext, fetcher: &'a dyn Fetcher) -> Self {
        Self {
            registry,
            context,
            fetcher,
        }
    }

    /// Resolve every request in order.
    pub fn resolve_all(&self, requests: &[PackageRequest]) -> Result<Vec<Resolution>> {
        requests.iter().map(|request| self.resolve(&request.name, &request.version)).collect()
    }

    /// Resolve `name` at exactly `version`, installing it and its dependencies.
    ///
    /// # Errors
    ///
    /// - fetch and file system failures, which end the run
    /// - [`MkpmError::CircularDependency`] if the catalog has a cycle
    /// - [`MkpmError::PackageNotFound`] / [`MkpmError::VersionNotFound`] only
    ///   under [`MissPolicy::Error`]
    pub fn resolve(&self, name: &str, version: &str) -> Result<Resolution> {
        let mut path = ResolutionPath::new();
        self.resolve_node(name, version, &mut path)
    }

    fn resolve_node(&self, name: &str, version: &str, path: &mut ResolutionPath) -> Result<Resolution> {
        debug!("Finding package: {}({})", name, version);

        let Some((entry, record)) = self.lookup(name, version)? else {
            return Ok(Resolution::Missing);
        };

        if path.iter().any(|(n, v)| n == name && v == version) {
            let chain: Vec<String> = path
                .iter()
                .map(|(n, v)| format!("{n}({v})"))
                .chain(std::iter::once(format!("{name}({version})")))
                .collect();
            return Err(MkpmError::CircularDependency {
                chain: chain.join(" -> "),
            }
            .into());
        }

        info!("Install package({}): {}({})", entry.kind.label(), name, version);

        let emitter = Emitter::for_type(entry.kind);

        path.push((name.to_string(), version.to_string()));
        let deps = if emitter.follows_dependencies() {
            self.collect_dependencies(record, path)
        } else {
            Ok(DependencySet::new())
        };
        path.pop();
        let deps = deps?;

        let outcome = emitter::install(emitter, self.context, self.fetcher, name, record, &deps)?;
        let exported = emitter.exported(deps);

        Ok(match outcome {
            InstallOutcome::Skipped => Resolution::Skipped(exported),
            InstallOutcome::Installed => Resolution::Installed(exported),
        })
    }

    /// Resolve each declared dependency and build this frame's set.
    fn collect_dependencies(&self, record: &VersionRecord, path: &mut ResolutionPath) -> Result<DependencySet> {
        let mut deps = DependencySet::new();

        for dep in &record.dependencies {
            let child = self.resolve_node(&dep.name, &dep.version, path)?;
            deps.merge(child.into_dependencies());
            deps.record(&dep.name, dep.link);
        }

        Ok(deps)
    }

    fn lookup(&self, name: &str, version: &str) -> Result<Option<(&'a RegistryEntry, &'a VersionRecord)>> {
        let Some(entry) = self.registry.find(name) else {
            return self.miss(MkpmError::PackageNotFound {
                name: name.to_string(),
                suggestions: self.registry.suggest(name),
            });
        };

        let Some(record) = entry.find_version(version) else {
            return self.miss(MkpmError::VersionNotFound {
                package: name.to_string(),
                version: version.to_string(),
                available: entry.versions.iter().map(|r| r.version.clone()).collect(),
            });
        };

        Ok(Some((entry, record)))
    }

    fn miss<T>(&self, error: MkpmError) -> Result<Option<T>> {
        match self.context.on_missing {
            MissPolicy::Ignore => {
                debug!("Skipping: {error}");
                Ok(None)
            }
            MissPolicy::Warn => {
                warn!("Skipping: {error}{}", miss_hint(&error));
                Ok(None)
            }
            MissPolicy::Error => Err(error.into()),
        }
    }
}

fn miss_hint(error: &MkpmError) -> String {
    match error {
        MkpmError::PackageNotFound {
            suggestions,
            ..
        } if !suggestions.is_empty() => format!(" (did you mean: {}?)", suggestions.join(", ")),
        MkpmError::VersionNotFound {
            available,
            ..
        } if !available.is_empty() => format!(" (available: {})", available.join(", ")),
        _ => String::new(),
    }
}
