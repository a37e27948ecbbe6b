use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
	name = "loxer",
	version,
	about,
	after_long_help = "Logging is configured through RUST_LOG, e.g. RUST_LOG=loxer=debug."
)]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a script file
	File { path: PathBuf },
	/// Start an interactive prompt
	Repl,
}
