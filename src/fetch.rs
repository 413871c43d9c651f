// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use crate::error::InstallError;

pub trait HttpFetcher {
	/// GETs `url` and returns the body. Non-2xx responses are errors.
	fn fetch(&self, url: &str) -> Result<Vec<u8>, InstallError>;
}

pub struct ReqwestFetcher {
	client: reqwest::blocking::Client,
}

impl ReqwestFetcher {
	pub fn new(timeout: Duration) -> anyhow::Result<Self> {
		let client = reqwest::blocking::Client::builder()
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.timeout(timeout)
			.build()?;
		Ok(ReqwestFetcher { client })
	}
}

impl HttpFetcher for ReqwestFetcher {
	fn fetch(&self, url: &str) -> Result<Vec<u8>, InstallError> {
		log::debug!("GET {url}");
		let body = self
			.client
			.get(url)
			.send()
			.and_then(|response| response.error_for_status())
			.and_then(|response| response.bytes())
			.map_err(|e| InstallError::network(url, e))?;
		log::debug!("got {} bytes from {url}", body.len());
		Ok(body.to_vec())
	}
}

/// `base` + `relative`, with exactly one `/` between them.
pub fn join_url(base: &str, relative: &str) -> String {
	let relative = relative.trim_start_matches('/');
	if base.ends_with('/') {
		format!("{base}{relative}")
	} else {
		format!("{base}/{relative}")
	}
}
