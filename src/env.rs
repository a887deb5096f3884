//! Go toolchain environment lookup.
//!
//! The proxy base URL comes from the host's `go env GOPROXY`. Lookups go
//! through the [`GoEnv`] trait so the resolution pipeline can run against a
//! fixed environment in tests, and `go` itself is invoked through a
//! [`CommandExecutor`].

use crate::error::{BrewgoError, Result};
use log::{trace, warn};
use std::fmt;
use std::process::{Command, Output};
use url::Url;

/// Name of the Go environment variable holding the proxy list.
pub const GOPROXY: &str = "GOPROXY";

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while spawning or running the command.
    fn run(&self, cmd: &str, args: &[&str]) -> std::io::Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> std::io::Result<Output> {
        Command::new(cmd).args(args).output()
    }
}

/// Source of Go environment values.
#[cfg_attr(test, mockall::automock)]
pub trait GoEnv {
    /// Return the raw value of the named variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be obtained.
    fn var(&self, name: &str) -> Result<String>;
}

/// Reads values by running `go env <NAME>`.
///
/// # Examples
///
/// ```no_run
/// use brewgo::env::{GoCommandEnv, goproxy};
///
/// let proxy = goproxy(&GoCommandEnv::new())?;
/// println!("{proxy}");
/// # Ok::<(), brewgo::error::BrewgoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GoCommandEnv<E = SystemCommandExecutor> {
    executor: E,
}

impl GoCommandEnv {
    /// Create a lookup that runs the host's `go` binary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            executor: SystemCommandExecutor,
        }
    }
}

impl Default for GoCommandEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> GoCommandEnv<E> {
    /// Create a lookup that runs `go` through `executor`.
    #[must_use]
    pub const fn with_executor(executor: E) -> Self {
        Self { executor }
    }
}

impl<E: CommandExecutor> GoEnv for GoCommandEnv<E> {
    fn var(&self, name: &str) -> Result<String> {
        trace!("running go env {name}");
        let output =
            self.executor
                .run("go", &["env", name])
                .map_err(|e| BrewgoError::EnvCommand {
                    name: name.to_owned(),
                    reason: format!("failed to run go: {e}"),
                })?;

        if !output.status.success() {
            return Err(BrewgoError::EnvCommand {
                name: name.to_owned(),
                reason: stderr_message(&output),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Look up `name` and reject blank values.
///
/// # Errors
///
/// Returns [`BrewgoError::EmptyEnvironment`] if the trimmed value is empty,
/// or whatever error the provider reports.
pub fn env_var(env: &dyn GoEnv, name: &str) -> Result<String> {
    let value = env.var(name)?;
    let trimmed = value.trim();
    trace!("go env {name} = {trimmed:?}");
    if trimmed.is_empty() {
        return Err(BrewgoError::EmptyEnvironment {
            name: name.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

/// Resolve the module proxy base URL from `GOPROXY`.
///
/// Only the first entry of the list is considered. Entries are separated by
/// `,` or `|`.
///
/// # Errors
///
/// Returns [`BrewgoError::EmptyEnvironment`] for a blank value and
/// [`BrewgoError::InvalidProxyConfig`] when the first entry is `direct`,
/// `off`, or not an HTTP(S) URL.
pub fn goproxy(env: &dyn GoEnv) -> Result<ProxyBase> {
    let value = env_var(env, GOPROXY)?;
    let mut entries = value.split([',', '|']).map(str::trim);
    let first = entries.next().unwrap_or_default();
    if entries.next().is_some() {
        warn!("GOPROXY lists several entries; only {first:?} is used");
    }
    ProxyBase::parse(first)
}

/// A usable module proxy base URL without a trailing slash.
///
/// # Examples
///
/// ```
/// use brewgo::env::ProxyBase;
///
/// let base = ProxyBase::parse("https://proxy.golang.org/").unwrap();
/// assert_eq!(base.join("/golang.org/x/text/@latest"),
///            "https://proxy.golang.org/golang.org/x/text/@latest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyBase(String);

impl ProxyBase {
    /// Validate a single proxy entry.
    ///
    /// # Errors
    ///
    /// Returns [`BrewgoError::InvalidProxyConfig`] for the `direct` and `off`
    /// sentinels and for anything that is not an absolute HTTP(S) URL.
    pub fn parse(entry: &str) -> Result<Self> {
        let invalid = |reason: &str| BrewgoError::InvalidProxyConfig {
            value: entry.to_owned(),
            reason: reason.to_owned(),
        };

        match entry {
            "direct" => {
                return Err(invalid(
                    "GOPROXY must be set to something other than 'direct'",
                ));
            }
            "off" => return Err(invalid("module downloads are disabled")),
            _ => {}
        }

        let url = Url::parse(entry).map_err(|e| invalid(&format!("not a URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("proxy URL must use http or https"));
        }

        Ok(Self(entry.trim_end_matches('/').to_owned()))
    }

    /// Return the base URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a rooted proxy path to the base.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }
}

impl fmt::Display for ProxyBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn stderr_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        format!("go exited with {}", output.status)
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
