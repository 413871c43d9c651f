// SPDX-License-Identifier: AGPL-3.0-or-later

use std::io::Write;

use flexi_logger::{DeferredNow, LogSpecification, Logger, LoggerHandle};

/// Diagnostics go to stderr so they never mix with the prompts on stdout.
/// `RUST_LOG` wins over the `-v`/`-q` flags when set.
pub fn init(level: log::LevelFilter) -> anyhow::Result<LoggerHandle> {
	let spec = match std::env::var("RUST_LOG") {
		Ok(spec) if !spec.trim().is_empty() => LogSpecification::parse(&spec)?,
		_ => LogSpecification::builder().default(level).build(),
	};

	let handle = Logger::with(spec).log_to_stderr().format(format).start()?;
	log_panics::init();
	Ok(handle)
}

fn format(w: &mut dyn Write, _now: &mut DeferredNow, record: &log::Record) -> std::io::Result<()> {
	write!(w, "[{}] {}", record.level(), record.args())
}
