//! CLI argument definitions for brewgo.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::Parser;
use std::time::Duration;

/// Generate Homebrew formulae for Go modules.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "brewgo")]
#[command(version, about)]
#[command(long_about = concat!(
    "Generate Homebrew formulae for Go modules.\n\n",
    "brewgo asks the Go module proxy (the first entry of `go env GOPROXY`) for ",
    "the requested version of a module, downloads the module's source archive, ",
    "computes its SHA-256 and renders a formula that builds the module with ",
    "`go install`.",
))]
#[command(after_help = concat!(
    "MODULE REFERENCES:\n",
    "  golang.org/x/tools/gopls            latest version\n",
    "  golang.org/x/tools/gopls@v0.16.1    explicit version\n",
    "  golang.org/x/tools/gopls@upgrade    any proxy query token\n\n",
    "EXAMPLES:\n",
    "  Print a formula:\n",
    "    $ brewgo --print github.com/junegunn/fzf\n\n",
    "  Write a formula into a tap:\n",
    "    $ brewgo --print -o Formula/fzf.rb github.com/junegunn/fzf@v0.54.0\n\n",
    "  Use a specific proxy:\n",
    "    $ brewgo --print --proxy https://goproxy.io github.com/junegunn/fzf",
))]
pub struct Cli {
    /// Print the formula instead of installing the package via brew.
    #[arg(long)]
    pub print: bool,

    /// Module proxy base URL [default: first entry of `go env GOPROXY`].
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Abort any proxy request that takes longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Write the formula to FILE instead of standard output.
    #[arg(short, long, value_name = "FILE", requires = "print")]
    pub output: Option<Utf8PathBuf>,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,

    /// Module references of the form module[@version-or-selector].
    #[arg(value_name = "MODULE")]
    pub targets: Vec<String>,
}

impl Cli {
    /// Return the configured request timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use brewgo_cli::cli::Cli;
    /// use std::time::Duration;
    ///
    /// let cli = Cli { timeout: Some(30), ..Cli::default() };
    /// assert_eq!(cli.request_timeout(), Some(Duration::from_secs(30)));
    /// assert_eq!(Cli::default().request_timeout(), None);
    /// ```
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
