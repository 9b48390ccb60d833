//! Git command builder for consistent command execution
//!
//! Every git invocation goes through [`GitCommand`] so commands are logged the
//! same way (`target: "git"`) and failures map to the same [`MkpmError`]
//! variants. Commands block the calling thread until git exits.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::MkpmError;
use crate::utils::platform::get_git_command;

/// Builder for a single git invocation.
///
/// # Examples
///
/// ```rust,no_run
/// use mkpm_cli::git::command_builder::GitCommand;
///
/// # fn example() -> anyhow::Result<()> {
/// GitCommand::clone("https://github.com/example/Foo.git", "Packages/Foo")
///     .with_context("Foo")
///     .execute_success()?;
///
/// GitCommand::reset_hard("3f2a9c1").current_dir("Packages/Foo").execute_success()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GitCommand {
    /// Arguments after `git` (and after `-C <dir>` when a directory is set)
    args: Vec<String>,

    /// Repository to run in, passed as `-C <dir>`
    current_dir: Option<PathBuf>,

    /// Label prefixed to log lines, usually the package name
    context: Option<String>,

    /// For clone commands, the URL for error messages
    clone_url: Option<String>,
}

/// Output from a git command
#[derive(Debug)]
pub struct GitCommandOutput {
    /// Standard output
    pub stdout: String,
}

impl GitCommand {
    /// Creates an empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `dir` (`git -C <dir> ...`).
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Label used in log lines.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Full argument list as passed to the git executable.
    fn full_args(&self) -> Vec<String> {
        let mut full_args = Vec::new();
        if let Some(ref dir) = self.current_dir {
            full_args.push("-C".to_string());
            full_args.push(dir.display().to_string());
        }
        full_args.extend(self.args.iter().cloned());
        full_args
    }

    /// Run the command, capturing its output.
    ///
    /// # Errors
    ///
    /// - [`MkpmError::GitNotFound`] if the git executable cannot be started
    /// - [`MkpmError::GitCloneFailed`] for a failing `clone`
    /// - [`MkpmError::GitResetFailed`] for a failing `reset --hard`
    /// - [`MkpmError::GitCommandError`] for any other non-zero exit
    pub fn execute(self) -> Result<GitCommandOutput> {
        let git_command = get_git_command();
        let full_args = self.full_args();

        match self.context {
            Some(ref ctx) => tracing::debug!(
                target: "git",
                "({}) Executing command: {} {}",
                ctx,
                git_command,
                full_args.join(" ")
            ),
            None => tracing::debug!(
                target: "git",
                "Executing command: {} {}",
                git_command,
                full_args.join(" ")
            ),
        }

        let output = match Command::new(git_command)
            .args(&full_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MkpmError::GitNotFound.into());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to execute git {}", full_args.join(" ")));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "git",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "git", "Error: {}", stderr.trim());
            }

            let first = self.args.first().map(String::as_str);
            let error = match first {
                Some("clone") => MkpmError::GitCloneFailed {
                    url: self.clone_url.unwrap_or_else(|| "unknown".to_string()),
                    reason: stderr,
                },
                Some("reset") => MkpmError::GitResetFailed {
                    revision: self.args.last().cloned().unwrap_or_default(),
                    reason: stderr,
                },
                _ => MkpmError::GitCommandError {
                    operation: first.unwrap_or("unknown").to_string(),
                    stderr,
                },
            };
            return Err(error.into());
        }

        if !stdout.trim().is_empty() {
            tracing::trace!(target: "git", "{}", stdout.trim());
        }

        Ok(GitCommandOutput {
            stdout,
        })
    }

    /// Run the command and return trimmed stdout.
    pub fn execute_stdout(self) -> Result<String> {
        let output = self.execute()?;
        Ok(output.stdout.trim().to_string())
    }

    /// Run the command, discarding its output.
    pub fn execute_success(self) -> Result<()> {
        self.execute()?;
        Ok(())
    }
}

// Convenience builders for the operations MKPM performs

impl GitCommand {
    /// `git clone <url> <target>`
    pub fn clone(url: &str, target: impl AsRef<Path>) -> Self {
        let mut cmd = Self::new().args(["clone", url]).arg(target.as_ref().display().to_string());
        cmd.clone_url = Some(url.to_string());
        cmd
    }

    /// `git reset --hard <revision>`
    pub fn reset_hard(revision: &str) -> Self {
        Self::new().args(["reset", "--hard", revision])
    }

    /// `git pull --ff-only`
    pub fn pull() -> Self {
        Self::new().args(["pull", "--ff-only"])
    }

    /// `git rev-parse HEAD`
    pub fn current_commit() -> Self {
        Self::new().args(["rev-parse", "HEAD"])
    }
}
