// SPDX-License-Identifier: AGPL-3.0-or-later
mod app;
mod error;
mod fetch;
mod install;
mod logging;
mod manifest;
mod platform;
mod prompt;
mod selector;
mod target;
#[cfg(test)]
mod test_fixtures;

use std::{io::IsTerminal, process::ExitCode, time::Duration};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::{
	app::{Job, DEFAULT_BUNDLE},
	error::InstallError,
	fetch::ReqwestFetcher,
	platform::{Platform, PlatformKind},
	prompt::{Lines, Prompter, Terminal, Unattended},
	target::PathOptions,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, disable_help_subcommand = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,
	#[command(flatten)]
	path: PathArgs,
	/// Repository the manifests and scripts are downloaded from
	#[arg(
		long,
		global = true,
		env = "MPV_SCRIPTS_BASE_URL",
		default_value = "https://raw.githubusercontent.com/RivenSkaye/mpv-scripts/master/"
	)]
	base_url: http::Uri,
	/// Treat the target as this kind of OS instead of the one we're running on
	#[arg(long, global = true, value_enum)]
	platform: Option<PlatformKind>,
	/// Accept the default answer to every question
	#[arg(short = 'y', long, global = true)]
	yes: bool,
	/// Seconds to wait on each download
	#[arg(long, global = true, default_value_t = 30)]
	timeout: u64,
	#[command(flatten)]
	verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,
}

#[derive(Debug, Args)]
struct PathArgs {
	/// Use the default mpv scripts directory for this user
	#[arg(short = 'd', long = "default", global = true)]
	use_default: bool,
	/// Path to the mpv scripts directory. Wins over --default
	#[arg(short, long, global = true, value_name = "PATH")]
	scripts: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Pick scripts to install from the repository's scripts.json (default)
	Menu,
	/// Install every file a bundle lists in its filelist.txt
	Bundle {
		#[arg(default_value = DEFAULT_BUNDLE)]
		name: String,
	},
}

fn main() -> ExitCode {
	let _ = dotenvy::dotenv(); // load .env file if available for `MPV_SCRIPTS_BASE_URL` variable
	let args = Cli::parse();

	let _logger = match logging::init(args.verbose.log_level_filter()) {
		Ok(handle) => Some(handle),
		Err(e) => {
			eprintln!("failed to set up logging: {e:#}");
			None
		}
	};

	match install(args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => match err.downcast_ref::<InstallError>() {
			Some(InstallError::Declined { .. }) => {
				println!("Please run the installer again with the correct path (--scripts <path>) or the '--default' option.");
				ExitCode::from(1)
			}
			_ => {
				eprintln!("error: {err:#}");
				ExitCode::from(2)
			}
		},
	}
}

fn install(args: Cli) -> anyhow::Result<()> {
	if args.base_url.host().is_none() {
		anyhow::bail!("base url is missing a host. url: {}", args.base_url);
	}
	let base_url = args.base_url.to_string();

	let job = match args.command.unwrap_or(Commands::Menu) {
		Commands::Menu => Job::Menu,
		Commands::Bundle { name } => Job::Bundle { name },
	};
	let options = PathOptions {
		use_default: args.path.use_default,
		scripts: args.path.scripts,
	};

	println!("Welcome to the mpv scripts installer!\n");
	let platform = match args.platform {
		Some(kind) => Platform::for_kind(kind),
		None => Platform::detect(),
	};
	match platform.kind {
		PlatformKind::Windows => println!("Installing for Windows. If this is wrong, rerun with --platform posix.\n"),
		PlatformKind::Posix => println!("Installing for a UNIX-like OS. If this is wrong, rerun with --platform windows.\n"),
	}

	let fetcher = ReqwestFetcher::new(Duration::from_secs(args.timeout))?;
	let mut prompter: Box<dyn Prompter> = if args.yes {
		Box::new(Unattended)
	} else if std::io::stdin().is_terminal() {
		Box::new(Terminal)
	} else {
		Box::new(Lines::stdio())
	};

	log::debug!("job {job:?} from {base_url}");
	let report = app::run(&job, &options, &platform, &base_url, &fetcher, prompter.as_mut())
		.with_context(|| format!("install from {base_url} did not finish"))?;

	if report.written.is_empty() {
		println!("\nNothing was installed.");
	} else {
		// We only know nothing failed, not that every byte landed.
		println!(
			"\nShould've been successful installing {} file(s) into '{}'. Don't forget to run me again for updates!",
			report.written.len(),
			report.target.dir()
		);
	}
	Ok(())
}
