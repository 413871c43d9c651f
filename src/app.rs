// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use crate::{
	error::InstallError,
	fetch::{join_url, HttpFetcher},
	install::Installer,
	manifest::{self, Manifest, ManifestKind},
	platform::Platform,
	prompt::Prompter,
	selector::Selector,
	target::{self, InstallTarget, PathOptions},
};

pub const DEFAULT_BUNDLE: &str = "yeetpls";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
	/// Everything in `<base>/<name>/filelist.txt`, installed into `<scripts>/<name>/`.
	Bundle { name: String },
	/// Pick units from `<base>/scripts.json`.
	Menu,
}

#[derive(Debug)]
pub struct Report {
	pub target: InstallTarget,
	pub written: Vec<PathBuf>,
}

/// One full run: resolve the path, fetch the manifest, install what was asked for.
///
/// Nothing is remembered between runs, so every unit is offered again next time.
pub fn run(
	job: &Job,
	options: &PathOptions,
	platform: &Platform,
	base_url: &str,
	fetcher: &dyn HttpFetcher,
	prompter: &mut dyn Prompter,
) -> Result<Report, InstallError> {
	let subfolder = match job {
		Job::Bundle { name } => Some(name.as_str()),
		Job::Menu => None,
	};
	let target = target::resolve(options, platform, subfolder, prompter)?;

	let (manifest_url, kind) = match job {
		Job::Bundle { name } => (join_url(base_url, &format!("{name}/")), ManifestKind::FileList),
		Job::Menu => (base_url.to_owned(), ManifestKind::Units),
	};

	println!("Please give me a moment to fetch a list of available scripts...\n");
	let manifest = manifest::fetch(fetcher, &manifest_url, kind)?;
	if manifest.is_empty() {
		log::warn!("{} doesn't list anything to install", join_url(&manifest_url, kind.file_name()));
	}

	let installer = Installer::new(fetcher, &target);
	let mut written = Vec::new();
	match manifest {
		Manifest::FileList(files) => {
			written = installer.install_files(&manifest_url, &files, &target)?;
		}
		Manifest::Units(units) => {
			let mut selector = Selector::new(units);
			while let Some(selection) = selector.select_next(prompter)? {
				for (name, unit) in &selection {
					written.extend(installer.install_unit(name, unit, prompter)?);
				}
			}
		}
	}

	Ok(Report { target, written })
}
