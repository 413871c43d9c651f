// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can stop an install run. None of these are recovered from.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
	#[error("invalid install path: {0}")]
	InvalidPath(String),

	#[error("failed to fetch {url}")]
	Network {
		url: String,
		#[source]
		source: BoxError,
	},

	#[error("failed to parse manifest from {url}")]
	ManifestParse {
		url: String,
		#[source]
		source: BoxError,
	},

	#[error("failed to write {}", path.display())]
	Filesystem {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to talk to the terminal")]
	Prompt(#[source] BoxError),

	/// The user rejected the resolved path. Maps to exit code 1.
	#[error("install path '{path}' was not confirmed")]
	Declined { path: String },
}

impl InstallError {
	pub fn network(url: &str, source: impl Into<BoxError>) -> Self {
		InstallError::Network {
			url: url.to_owned(),
			source: source.into(),
		}
	}

	pub fn manifest(url: &str, source: impl Into<BoxError>) -> Self {
		InstallError::ManifestParse {
			url: url.to_owned(),
			source: source.into(),
		}
	}

	pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		InstallError::Filesystem {
			path: path.into(),
			source,
		}
	}
}

impl From<inquire::InquireError> for InstallError {
	fn from(err: inquire::InquireError) -> Self {
		InstallError::Prompt(Box::new(err))
	}
}
