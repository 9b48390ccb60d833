//! Test utilities for MKPM
//!
//! - [`RegistryBuilder`] / [`PackageSpec`] build catalogs without JSON literals
//! - [`RecordingFetcher`] / [`FailingFetcher`] stand in for git
//! - [`TestGit`] creates real repositories for fetcher and CLI tests
//!
//! # Example
//!
//! ```rust,ignore
//! use mkpm_cli::resolver::{InstallContext, Resolver};
//! use mkpm_cli::test_utils::{PackageSpec, RecordingFetcher, RegistryBuilder};
//!
//! let registry = RegistryBuilder::new()
//!     .add(PackageSpec::lib("Foo", "1.0").dep("Bar", "2.0", "Static"))
//!     .add(PackageSpec::lib("Bar", "2.0"))
//!     .build();
//! let temp = tempfile::TempDir::new().unwrap();
//! let context = InstallContext::new(temp.path());
//! let fetcher = RecordingFetcher::new();
//!
//! Resolver::new(&registry, &context, &fetcher).resolve("Foo", "1.0").unwrap();
//! assert_eq!(fetcher.fetched_names(), vec!["Bar", "Foo"]);
//! ```

pub mod builder;
pub mod fetcher;
pub mod git_helper;

pub use builder::{PackageSpec, RegistryBuilder};
pub use fetcher::{FailingFetcher, FetchCall, RecordingFetcher};
pub use git_helper::{TestGit, create_package_repo};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; does nothing if neither is
/// set. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
