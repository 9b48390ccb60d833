//! Integration test suite for MKPM
//!
//! End-to-end tests that run the `mkpm` binary against temporary registries
//! and local git repositories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: Help, version and argument errors
//! - **errors**: Registry and lookup failures, exit codes
//! - **install**: Fetching, fragments, manifests, idempotence
//! - **list**: Catalog listing
//!
//! Tests that need git return early when it is not installed.

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod errors;
mod install;
mod list;
