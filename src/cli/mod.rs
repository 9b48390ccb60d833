//! Command-line interface for MKPM
//!
//! `mkpm` is a single command: load the package registry, then either print
//! it (`--list`) or install every `--add NAME/VERSION` request together with
//! its dependencies, writing a make fragment per package.
//!
//! # Examples
//!
//! ```bash
//! # Install Foo 1.0 and its dependencies under ./Packages
//! mkpm -a Foo/1.0
//!
//! # Use a local catalog and a different install root
//! mkpm -i ./Packages.json -p ~/work -a Foo/1.0 -a Tool/2.1
//!
//! # Show what the catalog offers
//! mkpm --list
//!
//! # Re-fetch everything, failing on unknown references
//! mkpm -f --on-missing error -a Foo/1.0
//! ```
//!
//! # Registry Source
//!
//! Without `--input` the default catalog repository is cloned into
//! `<root>/Configuration` on first use and pulled on later runs; its
//! `Packages.json` is the registry.
//!
//! # Logging
//!
//! Progress goes to stderr through `tracing`. `RUST_LOG` takes precedence
//! over `--verbose` / `--quiet`.


use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_REGISTRY_DIR, DEFAULT_REGISTRY_FILE, DEFAULT_REGISTRY_URL};
use crate::git::{Fetcher, GitFetcher};
use crate::models::PackageRequest;
use crate::registry::{Registry, list::list_packages};
use crate::resolver::{InstallContext, MissPolicy, Resolver};
use crate::utils::fs::ensure_dir;
use crate::utils::platform::resolve_path;

/// Runtime configuration derived from the command line.
///
/// Kept apart from [`Cli`] so tests can run commands without installing the
/// global subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default filter directive; `None` disables logging unless `RUST_LOG`
    /// is set.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a configuration with logging disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// The filter [`init_logging`](Self::init_logging) would install, if any.
    #[must_use]
    pub fn env_filter(&self) -> Option<EnvFilter> {
        if std::env::var("RUST_LOG").is_ok() {
            return Some(EnvFilter::from_default_env());
        }
        self.log_level.as_deref().map(EnvFilter::new)
    }

    /// Install the global `tracing` subscriber.
    ///
    /// Output goes to stderr without targets or timestamps. Calling this
    /// twice is harmless.
    pub fn init_logging(&self) {
        let Some(filter) = self.env_filter() else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Makefile package manager.
#[derive(Parser, Debug)]
#[command(
    name = "mkpm",
    about = "Install packages from a catalog and generate make fragments for them",
    version,
    long_about = "MKPM resolves packages against a JSON catalog, fetches each one and its \
                  dependencies with git, and writes a <name>.mk fragment per package for a \
                  make-based build."
)]
pub struct Cli {
    /// Registry file. Defaults to the catalog repository cloned into
    /// `<path>/Configuration`.
    #[arg(short = 'i', long = "input", value_name = "FILE", env = "MKPM_REGISTRY")]
    input: Option<String>,

    /// Install root; packages go to `<path>/Packages`.
    #[arg(short = 'p', long = "path", value_name = "DIR", env = "MKPM_ROOT", default_value = ".")]
    path: String,

    /// Package to install, as NAME/VERSION. Repeatable.
    #[arg(short = 'a', long = "add", value_name = "NAME/VERSION")]
    add: Vec<PackageRequest>,

    /// Re-fetch packages even when already at the requested version.
    #[arg(short, long)]
    force: bool,

    /// Print the catalog instead of installing.
    #[arg(short, long)]
    list: bool,

    /// What to do with a package or version the catalog does not have.
    #[arg(long, value_enum, value_name = "POLICY", default_value_t = MissPolicy::Ignore)]
    on_missing: MissPolicy,

    /// Show debug output.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Show errors only.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Run with logging configured from `--verbose` / `--quiet`.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config)
    }

    /// Translate verbosity flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
        }
    }

    /// Run without installing a subscriber.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        debug!("Running with {:?}", config);

        let root = resolve_path(&self.path)?;
        let git = GitFetcher::new();
        let registry = self.load_registry(&root, &git)?;

        if self.list {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            list_packages(&registry, &mut out).context("Failed to print the package list")?;
            out.flush()?;
            return Ok(());
        }

        self.install(&registry, &root, &git)
    }

    /// Resolve every `--add` request into `root` using `fetcher`.
    pub fn install(&self, registry: &Registry, root: &Path, fetcher: &dyn Fetcher) -> Result<()> {
        if self.add.is_empty() {
            info!("Nothing to install");
            return Ok(());
        }

        let context = InstallContext::new(root)
            .with_force(self.force)
            .with_miss_policy(self.on_missing);
        ensure_dir(&context.packages_dir())?;

        let resolver = Resolver::new(registry, &context, fetcher);
        let results = resolver.resolve_all(&self.add)?;

        for (request, result) in self.add.iter().zip(&results) {
            if result.is_missing() {
                debug!("{} is not in the catalog", request);
            }
        }
        Ok(())
    }

    fn load_registry(&self, root: &Path, git: &GitFetcher) -> Result<Registry> {
        let path = match &self.input {
            Some(input) => resolve_path(input)?,
            None => fetch_default_registry(root, git)?,
        };
        Registry::load(&path).with_context(|| format!("Failed to load registry {}", path.display()))
    }
}

/// Clone or refresh the default catalog under `root` and return its
/// registry file.
///
/// A failed refresh keeps the existing checkout.
fn fetch_default_registry(root: &Path, git: &GitFetcher) -> Result<PathBuf> {
    let checkout = root.join(DEFAULT_REGISTRY_DIR);

    if checkout.join(".git").exists() {
        debug!("Updating catalog in {}", checkout.display());
        if let Err(e) = git.update(&checkout) {
            warn!("Could not update the package catalog, using the local copy: {e:#}");
        }
    } else {
        info!("Fetching package catalog from {}", DEFAULT_REGISTRY_URL);
        ensure_dir(root)?;
        git.clone_latest(DEFAULT_REGISTRY_URL, &checkout)
            .context("Failed to fetch the default package catalog")?;
    }

    Ok(checkout.join(DEFAULT_REGISTRY_FILE))
}
