//! MKPM - Make Package Manager
//!
//! Installs native-code packages from a declarative JSON catalog and emits
//! one make fragment per package, so a make-based build can order sub-builds
//! and pass each package its include paths and static/dynamic link sets.
//!
//! # Architecture Overview
//!
//! A run resolves each requested `(name, version)` depth-first:
//!
//! 1. [`registry`] finds the package and the exact version record
//! 2. [`resolver`] resolves the record's dependencies first, collecting a
//!    [`resolver::DependencySet`] from each
//! 3. [`emitter`] picks the install strategy for the package type, checks
//!    the [`manifest`], fetches the source through [`git`], and writes
//!    `<name>.mk`
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line flags, logging setup
//! - [`core`] - Error types and user-facing error formatting
//! - [`registry`] - Catalog parsing, lookup and listing
//! - [`resolver`] - Recursive resolution, cycle detection, miss policy
//! - [`emitter`] - Per-type install layout and fragment rendering
//! - [`manifest`] - `<name>.json` install records
//! - [`git`] - The [`git::Fetcher`] trait and its git implementation
//! - [`models`] - Shared request types
//! - [`utils`] - File system and platform helpers
//!
//! # Install Layout
//!
//! ```text
//! <root>/
//! ├── EasyCpp/                 # framework package
//! ├── <Framework>.json
//! └── Packages/
//!     ├── Foo/  Foo.json  Foo.mk
//!     ├── Interface/
//!     │   └── Hdr/  Hdr.json  Hdr.mk
//!     └── Platform/Linux/
//!         └── Drv/  Drv.json  Drv.mk
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod emitter;
pub mod git;
pub mod manifest;
pub mod models;
pub mod registry;
pub mod resolver;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
