//! brewgo CLI entrypoint.
//!
//! This binary resolves a Go module through the module proxy and prints a
//! Homebrew formula for it.

use brewgo::env::GoCommandEnv;
use brewgo::proxy::HttpTransport;
use brewgo_cli::cli::Cli;
use brewgo_cli::command::{Context, exit_code_for_run_result, run};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    let env = GoCommandEnv::new();
    let transport = HttpTransport::new(cli.request_timeout());
    let context = Context {
        env: &env,
        transport: &transport,
    };

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &context, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
