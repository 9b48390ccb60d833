//! Cross-platform utilities
//!
//! - [`fs`] - atomic writes, JSON files, directory helpers
//! - [`platform`] - git executable lookup and path expansion

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, remove_dir_all, safe_write};
pub use platform::{command_exists, get_git_command, is_windows, resolve_path};
