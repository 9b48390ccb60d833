//! Error handling for MKPM
//!
//! Errors follow two rules:
//! 1. **Strongly-typed errors** ([`MkpmError`]) for the failure modes the resolver,
//!    the registry loader and the fetcher can hit
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and a suggestion
//!    for the single top-level handler in `main`
//!
//! Library code returns [`anyhow::Result`] and attaches context with
//! [`anyhow::Context`]. The CLI converts whatever reaches it with
//! [`user_friendly_error`] and prints it in color.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mkpm_cli::core::{MkpmError, user_friendly_error};
//!
//! let err = anyhow::Error::from(MkpmError::GitNotFound);
//! let ctx = user_friendly_error(err);
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for MKPM operations
///
/// A malformed or missing install manifest never surfaces as an error: it is
/// read as "not installed" by [`crate::manifest`]. Every variant here is fatal
/// for the run once it reaches the CLI.
#[derive(Error, Debug)]
pub enum MkpmError {
    /// Git command returned a non-zero exit code
    #[error("Git operation failed: {operation}")]
    GitCommandError {
        /// The git operation that failed (e.g., "reset")
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// Git executable not found in PATH
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// Cloning a package repository failed
    #[error("Failed to clone repository: {url}")]
    GitCloneFailed {
        /// The repository URL that failed to clone
        url: String,
        /// The reason for the clone failure
        reason: String,
    },

    /// Hard reset to the pinned revision failed
    #[error("Failed to reset to revision '{revision}'")]
    GitResetFailed {
        /// The revision from the catalog
        revision: String,
        /// The reason for the reset failure
        reason: String,
    },

    /// Registry document does not exist
    #[error("Registry file not found: {path}")]
    RegistryNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Registry document is not valid JSON or does not match the catalog layout
    #[error("Invalid registry file syntax in {file}")]
    RegistryParseError {
        /// Path to the registry file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Registry parsed but breaks a catalog invariant
    #[error("Registry validation failed: {reason}")]
    RegistryValidationError {
        /// What was wrong
        reason: String,
    },

    /// Requested package name is not in the registry
    #[error("Package '{name}' not found in registry")]
    PackageNotFound {
        /// Requested package name
        name: String,
        /// Close matches from the registry, best first
        suggestions: Vec<String>,
    },

    /// Package exists but the exact version is not listed
    #[error("Version '{version}' not found for package '{package}'")]
    VersionNotFound {
        /// Package name
        package: String,
        /// Requested version
        version: String,
        /// Versions the registry does list for the package
        available: Vec<String>,
    },

    /// Circular dependency detected in the catalog
    ///
    /// `chain` reads like `A(1.0) -> B(2.0) -> A(1.0)`.
    #[error("Circular dependency detected: {chain}")]
    CircularDependency {
        /// String representation of the circular dependency chain
        chain: String,
    },

    /// A `name/version` request could not be split
    #[error("Invalid package request '{request}': {reason}")]
    InvalidRequest {
        /// The raw request string
        request: String,
        /// Why it was rejected
        reason: String,
    },

    /// File system error
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **error**: the main message in red
/// 2. **details**: additional context in yellow (optional)
/// 3. **suggestion**: actionable steps in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying MKPM error
    pub error: MkpmError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: MkpmError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// [`MkpmError`] values are found through any `anyhow` context layers; the
/// context messages themselves are kept as details. I/O errors get filesystem
/// guidance. Anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Messages of every layer, outermost context first, root cause last
    let layers: Vec<String> = error.chain().map(ToString::to_string).collect();

    let error = match error.downcast::<MkpmError>() {
        Ok(mkpm_error) => {
            let root = mkpm_error.to_string();
            let outer: Vec<&str> =
                layers.iter().map(String::as_str).take_while(|l| *l != root).collect();
            let ctx = create_error_context(mkpm_error);
            if ctx.details.is_none() && !outer.is_empty() {
                return ctx.with_details(outer.join(": "));
            }
            return ctx;
        }
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(MkpmError::FileSystemError {
                    operation: error.to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check permissions on the install root or run from a writable directory")
                .with_details("MKPM writes manifests, fragments and sources under the install root");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MkpmError::FileSystemError {
                    operation: error.to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(MkpmError::Other {
        message,
    })
}

/// Map each [`MkpmError`] variant to a tailored [`ErrorContext`].
fn create_error_context(error: MkpmError) -> ErrorContext {
    match &error {
        MkpmError::GitNotFound => ErrorContext::new(error)
            .with_suggestion("Install git from https://git-scm.com/ or your package manager (e.g., 'apt install git')")
            .with_details("MKPM fetches every package with 'git clone' followed by 'git reset --hard'"),

        MkpmError::GitCloneFailed { url, reason } => {
            let suggestion = format!(
                "Verify the repository URL is correct: {url}. Check your internet connection and repository access"
            );
            let reason = reason.clone();
            with_stderr(ErrorContext::new(error).with_suggestion(suggestion), &reason)
        }

        MkpmError::GitResetFailed { reason, .. } => {
            let reason = reason.clone();
            let ctx = ErrorContext::new(error)
                .with_suggestion("Check that the Revision in the registry exists in the package repository");
            with_stderr(ctx, &reason)
        }

        MkpmError::GitCommandError { stderr, .. } => {
            let stderr = stderr.clone();
            let ctx = ErrorContext::new(error)
                .with_suggestion("Try running the git command manually for more details");
            with_stderr(ctx, &stderr)
        }

        MkpmError::RegistryNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the catalog with '-i <file>' or omit it to fetch the default catalog"),

        MkpmError::RegistryParseError { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("The registry must be a JSON array of packages or an object with a 'Packages' array")
                .with_details(details)
        }

        MkpmError::RegistryValidationError { .. } => ErrorContext::new(error)
            .with_suggestion("Each package name and each version within a package must be unique"),

        MkpmError::PackageNotFound { suggestions, .. } => {
            let suggestion = if suggestions.is_empty() {
                "Run with '--list' to see available packages".to_string()
            } else {
                format!("Did you mean: {}?", suggestions.join(", "))
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        MkpmError::VersionNotFound { available, .. } => {
            let suggestion = if available.is_empty() {
                "The package lists no versions in the registry".to_string()
            } else {
                format!("Available versions: {}", available.join(", "))
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        MkpmError::CircularDependency { .. } => ErrorContext::new(error)
            .with_suggestion("Remove one of the Dependency entries forming the cycle from the registry")
            .with_details("Packages cannot depend on themselves directly or transitively"),

        MkpmError::InvalidRequest { .. } => ErrorContext::new(error)
            .with_suggestion("Requests use the form 'name/version', e.g. '-a Foo/1.0'"),

        _ => ErrorContext::new(error),
    }
}

/// Attach git's stderr as details unless it is empty.
fn with_stderr(ctx: ErrorContext, stderr: &str) -> ErrorContext {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        ctx
    } else {
        ctx.with_details(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_display() {
        let err = MkpmError::CircularDependency {
            chain: "A(1) -> B(1) -> A(1)".to_string(),
        };
        assert_eq!(err.to_string(), "Circular dependency detected: A(1) -> B(1) -> A(1)");

        let err = MkpmError::VersionNotFound {
            package: "Foo".to_string(),
            version: "9.9".to_string(),
            available: vec![],
        };
        assert_eq!(err.to_string(), "Version '9.9' not found for package 'Foo'");
    }

    #[test]
    fn test_user_friendly_error_git_not_found() {
        let ctx = user_friendly_error(anyhow::Error::from(MkpmError::GitNotFound));
        assert!(matches!(ctx.error, MkpmError::GitNotFound));
        assert!(ctx.suggestion.unwrap().contains("Install git"));
    }

    #[test]
    fn test_user_friendly_error_keeps_context_layers() {
        let err: anyhow::Result<()> = Err(MkpmError::GitCloneFailed {
            url: "https://example.com/foo.git".to_string(),
            reason: String::new(),
        })
        .context("Failed to fetch Foo");

        let ctx = user_friendly_error(err.unwrap_err());
        assert!(matches!(ctx.error, MkpmError::GitCloneFailed { .. }));
        assert!(ctx.suggestion.unwrap().contains("https://example.com/foo.git"));
    }

    #[test]
    fn test_git_stderr_becomes_details() {
        let ctx = user_friendly_error(anyhow::Error::from(MkpmError::GitCloneFailed {
            url: "u".to_string(),
            reason: "fatal: repository 'u' does not exist\n".to_string(),
        }));
        assert_eq!(ctx.details.as_deref(), Some("fatal: repository 'u' does not exist"));

        let ctx = user_friendly_error(anyhow::Error::from(MkpmError::GitResetFailed {
            revision: "abc".to_string(),
            reason: "fatal: ambiguous argument 'abc'".to_string(),
        }));
        assert!(matches!(ctx.error, MkpmError::GitResetFailed { .. }));
        assert_eq!(ctx.details.as_deref(), Some("fatal: ambiguous argument 'abc'"));

        let ctx = user_friendly_error(anyhow::Error::from(MkpmError::GitCommandError {
            operation: "pull".to_string(),
            stderr: "  ".to_string(),
        }));
        assert!(ctx.details.is_none());
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_package_suggestions() {
        let ctx = user_friendly_error(anyhow::Error::from(MkpmError::PackageNotFound {
            name: "Fooo".to_string(),
            suggestions: vec!["Foo".to_string()],
        }));
        assert!(matches!(ctx.error, MkpmError::PackageNotFound { .. }));
        assert_eq!(ctx.suggestion.as_deref(), Some("Did you mean: Foo?"));
    }

    #[test]
    fn test_user_friendly_error_generic_chain() {
        let err = anyhow::anyhow!("root cause").context("outer");
        let ctx = user_friendly_error(err);
        let message = ctx.error.to_string();
        assert!(message.contains("outer"));
        assert!(message.contains("Caused by:"));
        assert!(message.contains("root cause"));
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(MkpmError::GitNotFound)
            .with_details("details here")
            .with_suggestion("do this");
        let text = ctx.to_string();
        assert!(text.contains("Git is not installed"));
        assert!(text.contains("Details: details here"));
        assert!(text.contains("Suggestion: do this"));
    }
}
