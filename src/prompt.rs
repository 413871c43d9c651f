// SPDX-License-Identifier: AGPL-3.0-or-later

use std::io::{BufRead, Write};

use crate::error::InstallError;

pub trait Prompter {
	/// Shows `question` and returns the raw answer. End of input counts as an empty answer.
	fn ask(&mut self, question: &str) -> Result<String, InstallError>;

	/// Yes/no question. Empty answers take `default`; anything starting with `y` is a yes.
	fn confirm(&mut self, question: &str, default: bool) -> Result<bool, InstallError> {
		let hint = if default { "[Y/n]" } else { "[y/N]" };
		let answer = self.ask(&format!("{question} {hint}"))?;
		let answer = answer.trim();
		if answer.is_empty() {
			return Ok(default);
		}
		Ok(answer.to_ascii_lowercase().starts_with('y'))
	}
}

/// Interactive prompts on a real terminal.
pub struct Terminal;

impl Terminal {
	/// inquire renders a single line well; anything above it (menus, file lists) is printed first.
	fn split(question: &str) -> &str {
		match question.rsplit_once('\n') {
			Some((head, last)) => {
				println!("{head}");
				last
			}
			None => question,
		}
	}
}

impl Prompter for Terminal {
	fn ask(&mut self, question: &str) -> Result<String, InstallError> {
		let message = Terminal::split(question);
		Ok(inquire::Text::new(message).prompt()?.trim_end().to_owned())
	}

	fn confirm(&mut self, question: &str, default: bool) -> Result<bool, InstallError> {
		let message = Terminal::split(question);
		Ok(inquire::Confirm::new(message).with_default(default).prompt()?)
	}
}

/// Line-based prompter over any reader/writer pair, for when stdin isn't a terminal.
pub struct Lines<R, W> {
	input: R,
	output: W,
}

impl<R: BufRead, W: Write> Lines<R, W> {
	pub fn new(input: R, output: W) -> Self {
		Lines { input, output }
	}
}

impl Lines<std::io::StdinLock<'static>, std::io::Stdout> {
	pub fn stdio() -> Self {
		Lines::new(std::io::stdin().lock(), std::io::stdout())
	}
}

impl<R: BufRead, W: Write> Prompter for Lines<R, W> {
	fn ask(&mut self, question: &str) -> Result<String, InstallError> {
		let io_err = |e: std::io::Error| InstallError::Prompt(e.into());
		write!(self.output, "{question}\n\n> ").map_err(io_err)?;
		self.output.flush().map_err(io_err)?;

		let mut answer = String::new();
		let _ = self.input.read_line(&mut answer).map_err(io_err)?;
		writeln!(self.output).map_err(io_err)?;
		answer.truncate(answer.trim_end().len());
		Ok(answer)
	}
}

/// Answers every question with its default. Used for `--yes`.
pub struct Unattended;

impl Prompter for Unattended {
	fn ask(&mut self, question: &str) -> Result<String, InstallError> {
		println!("{question}\n> (default)\n");
		Ok(String::new())
	}
}
