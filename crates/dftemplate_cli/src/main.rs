#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use dftemplate::df::{CodeClientConfig, Scope};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "dftemplate", about = "DiamondFire code template tools")]
struct Cli {
	/// Raise log verbosity; repeat for more. `RUST_LOG` takes precedence.
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the encoded template string.
	Encode { path: PathBuf },
	/// Print the template's wire records as JSON.
	Records {
		path: PathBuf,
		#[arg(long)]
		compact: bool,
	},
	/// Print the template item as SNBT.
	Item {
		path: PathBuf,
		#[arg(long, default_value = "dftemplate")]
		author: String,
	},
	/// Give the template item through CodeClient.
	Send {
		path: PathBuf,
		#[arg(long, default_value = CodeClientConfig::DEFAULT_URL)]
		url: String,
		#[arg(long, default_value = "dftemplate")]
		author: String,
		#[arg(long, default_value_t = 2000)]
		connect_timeout_ms: u64,
		#[arg(long, default_value_t = 100)]
		ack_timeout_ms: u64,
	},
	/// Query or request CodeClient scopes.
	Scopes {
		#[arg(long, default_value = CodeClientConfig::DEFAULT_URL)]
		url: String,
		#[arg(long = "request", num_args = 1..)]
		request: Vec<Scope>,
		#[arg(long, default_value_t = 30_000)]
		wait_ms: u64,
	},
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: u8) {
	let default = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
		.with_writer(std::io::stderr)
		.init();
}

fn run(command: Commands) -> dftemplate::df::Result<()> {
	match command {
		Commands::Encode { path } => cmd::encode::run(path),
		Commands::Records { path, compact } => cmd::records::run(path, compact),
		Commands::Item { path, author } => cmd::item::run(path, author),
		Commands::Send {
			path,
			url,
			author,
			connect_timeout_ms,
			ack_timeout_ms,
		} => cmd::send::run(
			path,
			cmd::util::client_config(url, author, connect_timeout_ms, ack_timeout_ms),
		),
		Commands::Scopes { url, request, wait_ms } => cmd::scopes::run(
			cmd::util::client_config(url, CodeClientConfig::default().author, 2000, 100),
			request,
			wait_ms,
		),
	}
}
