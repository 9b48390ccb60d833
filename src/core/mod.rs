//! Core types shared across MKPM
//!
//! - [`error`] - [`MkpmError`], [`ErrorContext`] and [`user_friendly_error`]
//!   used by the top-level handler in `main`

pub mod error;

pub use error::{ErrorContext, MkpmError, user_friendly_error};
