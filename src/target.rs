// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::{Path, PathBuf};

use crate::{
	error::InstallError,
	platform::{LineEnding, Platform},
	prompt::Prompter,
};

/// What the command line said about the scripts directory.
#[derive(Debug, Clone, Default)]
pub struct PathOptions {
	pub use_default: bool,
	pub scripts: Option<String>,
}

/// A resolved directory to install into. The string form always ends with one separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
	dir: String,
	separator: char,
	line_ending: LineEnding,
}

impl InstallTarget {
	pub fn new(dir: &str, separator: char, line_ending: LineEnding) -> Result<Self, InstallError> {
		if dir.trim().is_empty() {
			return Err(InstallError::InvalidPath("the path is empty".to_owned()));
		}
		let mut dir = dir.to_owned();
		// Keep a bare root like `/` intact.
		while dir.len() > 1 && dir.ends_with(separator) {
			let _ = dir.pop();
		}
		if !dir.ends_with(separator) {
			dir.push(separator);
		}
		Ok(InstallTarget {
			dir,
			separator,
			line_ending,
		})
	}

	pub fn dir(&self) -> &str {
		&self.dir
	}

	pub fn path(&self) -> &Path {
		Path::new(&self.dir)
	}

	pub fn line_ending(&self) -> LineEnding {
		self.line_ending
	}

	/// `<dir><name><sep>`. `name` has to be a single path component.
	pub fn nested(&self, name: &str) -> Result<Self, InstallError> {
		let name = name.trim();
		if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
			return Err(InstallError::InvalidPath(format!("'{name}' is not a valid folder name")));
		}
		InstallTarget::new(&format!("{}{name}", self.dir), self.separator, self.line_ending)
	}

	/// Where a manifest entry ends up. Entries must stay inside the target.
	pub fn file_path(&self, relative: &str) -> Result<PathBuf, InstallError> {
		let invalid = || InstallError::InvalidPath(format!("refusing to write manifest entry '{relative}'"));
		let parts: Vec<&str> = relative.split(['/', '\\']).collect();
		if relative.trim().is_empty()
			|| relative.starts_with(['/', '\\'])
			|| relative.contains(':')
			|| parts.iter().any(|p| p.is_empty() || *p == "." || *p == "..")
		{
			return Err(invalid());
		}
		let sep = self.separator.to_string();
		Ok(PathBuf::from(format!("{}{}", self.dir, parts.join(sep.as_str()))))
	}
}

/// Turns the flags (or the user's answers) into the directory to install into.
/// `subfolder` is appended for bundles that live in their own folder.
pub fn resolve(
	options: &PathOptions,
	platform: &Platform,
	subfolder: Option<&str>,
	prompter: &mut dyn Prompter,
) -> Result<InstallTarget, InstallError> {
	let raw = match options.scripts.as_deref() {
		Some(path) => {
			if path.trim().is_empty() {
				return Err(InstallError::InvalidPath(
					"--scripts was given without a path".to_owned(),
				));
			}
			if options.use_default {
				log::warn!("both --default and --scripts were given; using '{path}'");
			}
			path.to_owned()
		}
		None if options.use_default => platform.default_path_template.to_owned(),
		None => {
			let answer = prompter.ask(&format!(
				"Please type the absolute or relative path to your mpv scripts directory.\nJust hit enter if {} is fine.",
				platform.default_path_template
			))?;
			let answer = answer.trim();
			if answer.is_empty() || answer.eq_ignore_ascii_case("default") {
				platform.default_path_template.to_owned()
			} else {
				answer.to_owned()
			}
		}
	};
	log::debug!("raw scripts path: {raw}");

	let expanded = platform.expander.expand(&raw)?;
	let mut target = InstallTarget::new(&expanded, platform.separator, platform.line_ending())?;
	if let Some(subfolder) = subfolder {
		target = target.nested(subfolder)?;
	}

	let question = match subfolder {
		Some(subfolder) => format!("Is the path '{}' correct? (it must end in {subfolder})", target.dir()),
		None => format!("Is the path '{}' correct?", target.dir()),
	};
	if !prompter.confirm(&question, true)? {
		return Err(InstallError::Declined {
			path: target.dir().to_owned(),
		});
	}
	log::info!("installing into {}", target.dir());
	Ok(target)
}
