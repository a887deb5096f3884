//! Command dispatch for the brewgo CLI.
//!
//! The binary wires the host Go environment and an HTTP transport into a
//! [`Context`]; tests substitute in-memory ones.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use brewgo::InfoBuilder;
use brewgo::env::{GoEnv, ProxyBase};
use brewgo::proxy::ProxyTransport;
use log::debug;
use std::io::Write;

/// External collaborators a command runs against.
pub struct Context<'a> {
    /// Source of Go environment values.
    pub env: &'a dyn GoEnv,
    /// Transport for module proxy requests.
    pub transport: &'a dyn ProxyTransport,
}

/// Run the command selected by `cli`.
///
/// # Errors
///
/// Returns the first error raised by the selected command.
pub fn run(
    cli: &Cli,
    context: &Context<'_>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    if cli.print {
        print_command(cli, context, stdout, stderr)
    } else {
        install_command(cli)
    }
}

/// Resolve the single target and write its formula.
///
/// The formula goes to `cli.output` when set, otherwise to `stdout`. Nothing
/// is written unless resolution succeeds completely.
///
/// # Errors
///
/// Returns [`CliError::NoTargets`] or [`CliError::TooManyTargets`] unless
/// exactly one target is given, and any resolution or write failure.
pub fn print_command(
    cli: &Cli,
    context: &Context<'_>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let target = single_target(&cli.targets)?;

    let defaults = InfoBuilder::new(context.env, context.transport);
    let builder = match cli.proxy.as_deref() {
        Some(proxy) => defaults.with_proxy(ProxyBase::parse(proxy)?),
        None => defaults,
    };

    if !cli.quiet {
        write_stderr_line(stderr, format!("Resolving {target}..."));
    }
    let info = builder.build(target)?;

    match &cli.output {
        Some(path) => {
            let formula = info.render_formula()?;
            std::fs::write(path, formula).map_err(|source| CliError::Output {
                path: path.clone(),
                source,
            })?;
            if !cli.quiet {
                write_stderr_line(
                    stderr,
                    format!("Wrote formula for {} to {path}", info.module()),
                );
            }
        }
        None => {
            let written = info.write_formula(stdout)?;
            debug!("wrote {written} bytes of formula for {}", info.module());
        }
    }

    Ok(())
}

fn install_command(cli: &Cli) -> Result<()> {
    debug!("install requested for {:?}", cli.targets);
    Err(CliError::InstallUnsupported)
}

fn single_target(targets: &[String]) -> Result<&str> {
    match targets {
        [target] => Ok(target.as_str()),
        [] => Err(CliError::NoTargets),
        many => Err(CliError::TooManyTargets { count: many.len() }),
    }
}

/// Map a run result to a process exit code, reporting any error on `stderr`.
pub fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

/// Write one line to `stderr`, ignoring failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
