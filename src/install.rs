// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use crate::{
	error::InstallError,
	fetch::{join_url, HttpFetcher},
	manifest::Unit,
	prompt::Prompter,
	target::InstallTarget,
};

pub struct Installer<'a> {
	fetcher: &'a dyn HttpFetcher,
	target: &'a InstallTarget,
}

impl<'a> Installer<'a> {
	pub fn new(fetcher: &'a dyn HttpFetcher, target: &'a InstallTarget) -> Self {
		Installer { fetcher, target }
	}

	/// Installs one unit from `scripts.json`. Returns the files written.
	pub fn install_unit(&self, name: &str, unit: &Unit, prompter: &mut dyn Prompter) -> Result<Vec<PathBuf>, InstallError> {
		let mut files = unit.required.clone();
		if !unit.optional.is_empty() {
			let joiner = "\n - ";
			let question = format!(
				"There are optional script files for {name}:{joiner}{}\nThese are recommended to have, would you like to install these?",
				unit.optional.join(joiner)
			);
			if prompter.confirm(&question, true)? {
				files.extend(unit.optional.iter().cloned());
			}
		}

		let dest = if unit.multifile {
			self.target.nested(name)?
		} else {
			self.target.clone()
		};
		log::info!("installing {name} ({} files) into {}", files.len(), dest.dir());
		self.install_files(&unit.base_url, &files, &dest)
	}

	/// Fetches every entry of `files` from `base_url` into `dest`, overwriting what's there.
	pub fn install_files(&self, base_url: &str, files: &[String], dest: &InstallTarget) -> Result<Vec<PathBuf>, InstallError> {
		// Reject the whole list up front rather than halfway through.
		let paths = files
			.iter()
			.map(|file| dest.file_path(file))
			.collect::<Result<Vec<_>, _>>()?;

		println!("- Creating {}", dest.dir());
		std::fs::create_dir_all(dest.path()).map_err(|e| InstallError::filesystem(dest.path(), e))?;

		for (file, path) in files.iter().zip(&paths) {
			let url = join_url(base_url, file);
			let body = self.fetcher.fetch(&url)?;
			let content = String::from_utf8(body).map_err(|e| InstallError::network(&url, e))?;
			let content = dest.line_ending().apply(&content);

			if let Some(parent) = path.parent() {
				std::fs::create_dir_all(parent).map_err(|e| InstallError::filesystem(parent, e))?;
			}
			println!("- Writing {}", path.display());
			std::fs::write(path, content).map_err(|e| InstallError::filesystem(path, e))?;
		}

		Ok(paths)
	}
}
