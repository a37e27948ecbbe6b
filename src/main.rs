use std::process::ExitCode;

use clap::Parser;
use loxer::{LoxError, Loxer, cli::*};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();

	let mut loxer = Loxer::new();

	match Cli::parse().mode {
		Mode::File { path } => match loxer.run_file(&path) {
			Ok(()) => ExitCode::SUCCESS,
			Err(e) => {
				if let LoxError::InternalError(e) = &e {
					eprintln!("Failed run file: {e:#}");
				}
				tracing::debug!("run failed: {e}");
				ExitCode::from(e.exit_code())
			}
		},
		Mode::Repl => {
			loxer.run_prompt();
			ExitCode::SUCCESS
		}
	}
}
