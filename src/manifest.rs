// SPDX-License-Identifier: AGPL-3.0-or-later

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use crate::{
	error::InstallError,
	fetch::{join_url, HttpFetcher},
};

pub const FILE_LIST: &str = "filelist.txt";
pub const UNITS_INDEX: &str = "scripts.json";

/// One installable script as described by `scripts.json`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Unit {
	pub base_url: String,
	#[serde(default)]
	pub required: Vec<String>,
	#[serde(default)]
	pub optional: Vec<String>,
	/// Files go into their own `<name>/` folder.
	#[serde(default)]
	pub multifile: bool,
}

/// Keeps the order the repository lists them in; the menu numbers depend on it.
pub type Units = IndexMap<String, Unit>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
	FileList,
	Units,
}

impl ManifestKind {
	pub fn file_name(self) -> &'static str {
		match self {
			ManifestKind::FileList => FILE_LIST,
			ManifestKind::Units => UNITS_INDEX,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
	FileList(Vec<String>),
	Units(Units),
}

impl Manifest {
	pub fn len(&self) -> usize {
		match self {
			Manifest::FileList(files) => files.len(),
			Manifest::Units(units) => units.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// One path per line. Blank lines and `#` comments are skipped, repeats collapse.
pub fn parse_file_list(text: &str) -> Vec<String> {
	text.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(str::to_owned)
		.collect::<IndexSet<_>>()
		.into_iter()
		.collect()
}

pub fn parse_units(text: &str) -> Result<Units, serde_json::Error> {
	serde_json::from_str(text)
}

pub fn fetch(fetcher: &dyn HttpFetcher, base_url: &str, kind: ManifestKind) -> Result<Manifest, InstallError> {
	match kind {
		ManifestKind::FileList => fetch_file_list(fetcher, base_url).map(Manifest::FileList),
		ManifestKind::Units => fetch_units(fetcher, base_url).map(Manifest::Units),
	}
}

pub fn fetch_file_list(fetcher: &dyn HttpFetcher, base_url: &str) -> Result<Vec<String>, InstallError> {
	let url = join_url(base_url, FILE_LIST);
	let files = parse_file_list(&fetch_text(fetcher, &url)?);
	log::info!("{url} lists {} files", files.len());
	Ok(files)
}

pub fn fetch_units(fetcher: &dyn HttpFetcher, base_url: &str) -> Result<Units, InstallError> {
	let url = join_url(base_url, UNITS_INDEX);
	let units = parse_units(&fetch_text(fetcher, &url)?).map_err(|e| InstallError::manifest(&url, e))?;
	log::info!("{url} lists {} scripts", units.len());
	Ok(units)
}

fn fetch_text(fetcher: &dyn HttpFetcher, url: &str) -> Result<String, InstallError> {
	let body = fetcher.fetch(url)?;
	let text = String::from_utf8(body).map_err(|e| InstallError::manifest(url, e))?;
	Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).replace("\r\n", "\n"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_fixtures::MockFetcher;

	#[test]
	fn file_list_skips_blank_and_comment_lines() {
		assert_eq!(parse_file_list("a.lua\n#comment\n\nb.lua\n"), ["a.lua", "b.lua"]);
		assert_eq!(parse_file_list("  # indented comment\r\n c.lua \r\n"), ["c.lua"]);
		assert!(parse_file_list("\n\n# nothing\n").is_empty());
	}

	#[test]
	fn file_list_drops_repeats_but_keeps_order() {
		assert_eq!(parse_file_list("b.lua\na.lua\nb.lua\n"), ["b.lua", "a.lua"]);
	}

	#[test]
	fn units_keep_manifest_order_and_defaults() {
		let units = parse_units(
			r#"{
				"zeta": {"base_url": "X/", "required": ["z.lua"]},
				"alpha": {"base_url": "Y/", "required": ["a.lua"], "optional": ["a.conf"], "multifile": true}
			}"#,
		)
		.unwrap();
		assert_eq!(units.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
		assert!(units["zeta"].optional.is_empty());
		assert!(!units["zeta"].multifile);
		assert!(units["alpha"].multifile);
	}

	#[test]
	fn fetch_reads_file_list_relative_to_base() {
		let fetcher = MockFetcher::new().with("X/yeetpls/filelist.txt", "a.lua\r\n# c\r\nb.lua\r\n");
		let manifest = fetch(&fetcher, "X/yeetpls/", ManifestKind::FileList).unwrap();
		assert_eq!(manifest, Manifest::FileList(vec!["a.lua".into(), "b.lua".into()]));
		assert_eq!(fetcher.requested(), ["X/yeetpls/filelist.txt"]);
	}

	#[test]
	fn fetch_tolerates_bom_and_crlf_in_json() {
		let fetcher = MockFetcher::new().with(
			"X/scripts.json",
			"\u{feff}{\r\n\"foo\": {\"base_url\": \"X/\", \"required\": [\"foo.lua\"], \"optional\": [], \"multifile\": false}\r\n}",
		);
		let Manifest::Units(units) = fetch(&fetcher, "X", ManifestKind::Units).unwrap() else {
			panic!("expected units");
		};
		assert_eq!(units["foo"].required, ["foo.lua"]);
	}

	#[test]
	fn broken_json_is_a_parse_error() {
		let fetcher = MockFetcher::new().with("X/scripts.json", "{\"foo\": [");
		assert!(matches!(
			fetch(&fetcher, "X/", ManifestKind::Units),
			Err(InstallError::ManifestParse { .. })
		));
	}

	#[test]
	fn non_utf8_body_is_a_parse_error() {
		let fetcher = MockFetcher::new().with_bytes("X/filelist.txt", vec![0xff, 0xfe, 0x00]);
		assert!(matches!(
			fetch(&fetcher, "X/", ManifestKind::FileList),
			Err(InstallError::ManifestParse { .. })
		));
	}

	#[test]
	fn missing_manifest_is_a_network_error() {
		let fetcher = MockFetcher::new();
		assert!(matches!(
			fetch(&fetcher, "X/", ManifestKind::Units),
			Err(InstallError::Network { .. })
		));
	}
}
