//! Platform helpers: locating git and expanding user-supplied paths.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns true on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Name of the git executable for the current platform.
#[must_use]
pub const fn get_git_command() -> &'static str {
    if is_windows() {
        "git.exe"
    } else {
        "git"
    }
}

/// Returns true if `cmd` resolves to an executable on PATH.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Expand a leading `~/` and `$VAR` / `${VAR}` references in a path argument.
///
/// # Errors
///
/// Fails when the path references an undefined environment variable or the
/// home directory cannot be determined.
///
/// # Examples
///
/// ```rust,no_run
/// use mkpm_cli::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let root = resolve_path("~/work/${PROJECT}")?;
/// # Ok(())
/// # }
/// ```
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).with_context(|| {
        format!(
            "Failed to expand path: {path}\n\n\
            Common issues:\n\
            - Undefined environment variable (e.g., $UNDEFINED_VAR)\n\
            - Invalid variable syntax (use $VAR or ${{VAR}})"
        )
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
