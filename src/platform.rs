// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::error::InstallError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlatformKind {
	Windows,
	Posix,
}

impl PlatformKind {
	/// Anything that isn't Windows gets treated as POSIX.
	pub fn detect() -> Self {
		if cfg!(windows) {
			PlatformKind::Windows
		} else {
			PlatformKind::Posix
		}
	}

	/// Where mpv looks for user scripts by default.
	pub fn default_path_template(self) -> &'static str {
		match self {
			PlatformKind::Windows => r"%APPDATA%\mpv\scripts\",
			PlatformKind::Posix => "~/.config/mpv/scripts/",
		}
	}

	pub fn line_ending(self) -> LineEnding {
		match self {
			PlatformKind::Windows => LineEnding::CrLf,
			PlatformKind::Posix => LineEnding::Lf,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
	Lf,
	CrLf,
}

impl LineEnding {
	/// Every `\r` in front of a line break is dropped first, so CRLF output never gets `\r\r\n`.
	pub fn apply(self, text: &str) -> String {
		let newline = match self {
			LineEnding::Lf => "\n",
			LineEnding::CrLf => "\r\n",
		};
		text.split('\n')
			.map(|line| line.trim_end_matches('\r'))
			.collect::<Vec<_>>()
			.join(newline)
	}
}

/// Expands the placeholder used in the default path templates.
pub trait PathExpander {
	fn expand(&self, raw: &str) -> Result<String, InstallError>;
}

/// Expands `%APPDATA%` and writes every separator the way the host expects, so a
/// Windows profile mounted on Linux still gets real `/` paths.
pub struct WindowsExpander {
	appdata: Option<String>,
	host_separator: char,
}

impl WindowsExpander {
	const PLACEHOLDER: &'static str = "%APPDATA%";

	pub fn new(appdata: Option<String>) -> Self {
		WindowsExpander {
			appdata,
			host_separator: std::path::MAIN_SEPARATOR,
		}
	}

	pub fn with_host_separator(mut self, separator: char) -> Self {
		self.host_separator = separator;
		self
	}

	pub fn from_env() -> Self {
		let appdata = non_empty_var("APPDATA").or_else(|| {
			directories::BaseDirs::new().map(|dirs| dirs.data_dir().display().to_string())
		});
		WindowsExpander::new(appdata)
	}
}

impl PathExpander for WindowsExpander {
	fn expand(&self, raw: &str) -> Result<String, InstallError> {
		let expanded = if raw.contains(Self::PLACEHOLDER) {
			let Some(appdata) = self.appdata.as_deref() else {
				return Err(InstallError::InvalidPath(format!(
					"{raw} uses {} but it isn't set",
					Self::PLACEHOLDER
				)));
			};
			raw.replace(Self::PLACEHOLDER, appdata)
		} else {
			raw.to_owned()
		};
		Ok(expanded.replace(['/', '\\'], &self.host_separator.to_string()))
	}
}

pub struct PosixExpander {
	home: Option<String>,
}

impl PosixExpander {
	pub fn new(home: Option<String>) -> Self {
		PosixExpander { home }
	}

	pub fn from_env() -> Self {
		let home = non_empty_var("HOME").or_else(|| {
			directories::UserDirs::new().map(|dirs| dirs.home_dir().display().to_string())
		});
		PosixExpander::new(home)
	}
}

impl PathExpander for PosixExpander {
	fn expand(&self, raw: &str) -> Result<String, InstallError> {
		// Only a leading `~` means home. `foo~bar` is a perfectly fine directory name.
		let rest = match raw.strip_prefix('~') {
			Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
			_ => return Ok(raw.to_owned()),
		};
		let Some(home) = self.home.as_deref() else {
			return Err(InstallError::InvalidPath(format!("{raw} uses ~ but HOME isn't set")));
		};
		let expanded = format!("{}{rest}", home.trim_end_matches('/'));
		if expanded.is_empty() {
			return Ok("/".to_owned());
		}
		Ok(expanded)
	}
}

fn non_empty_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Host facts picked once at startup and handed to the resolver. `kind` is what the
/// scripts are installed for; `separator` is always the host's, since that's where the files get written.
pub struct Platform {
	pub kind: PlatformKind,
	pub separator: char,
	pub default_path_template: &'static str,
	pub expander: Box<dyn PathExpander>,
}

impl Platform {
	pub fn detect() -> Self {
		Platform::for_kind(PlatformKind::detect())
	}

	pub fn for_kind(kind: PlatformKind) -> Self {
		let expander: Box<dyn PathExpander> = match kind {
			PlatformKind::Windows => Box::new(WindowsExpander::from_env()),
			PlatformKind::Posix => Box::new(PosixExpander::from_env()),
		};
		Platform::with_expander(kind, expander)
	}

	pub fn with_expander(kind: PlatformKind, expander: Box<dyn PathExpander>) -> Self {
		Platform {
			kind,
			separator: std::path::MAIN_SEPARATOR,
			default_path_template: kind.default_path_template(),
			expander,
		}
	}

	pub fn line_ending(&self) -> LineEnding {
		self.kind.line_ending()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn detection_matches_the_build_target() {
		let kind = PlatformKind::detect();
		assert_eq!(kind == PlatformKind::Windows, cfg!(windows));
		assert_eq!(Platform::for_kind(kind).separator, std::path::MAIN_SEPARATOR);
	}

	#[test]
	fn installing_for_windows_writes_host_paths() {
		let platform = Platform::for_kind(PlatformKind::Windows);
		assert_eq!(platform.separator, std::path::MAIN_SEPARATOR);
		assert_eq!(platform.line_ending(), LineEnding::CrLf);
	}

	#[test]
	fn crlf_content_becomes_lf_on_posix() {
		assert_eq!(LineEnding::Lf.apply("a\r\nb\r\n"), "a\nb\n");
		assert_eq!(LineEnding::Lf.apply("a\nb"), "a\nb");
		assert_eq!(LineEnding::Lf.apply("x\r\r\ny"), "x\ny");
	}

	#[test]
	fn windows_line_endings_are_never_doubled() {
		assert_eq!(LineEnding::CrLf.apply("a\r\nb\nc"), "a\r\nb\r\nc");
		assert!(!LineEnding::CrLf.apply("x\r\n\r\ny\n").contains("\r\r"));
		assert_eq!(LineEnding::CrLf.apply("x\r\r\ny"), "x\r\ny");
	}

	#[test]
	fn windows_expander_replaces_appdata_and_slashes() {
		let expander =
			WindowsExpander::new(Some(r"C:\Users\me\AppData\Roaming".to_owned())).with_host_separator('\\');
		assert_eq!(
			expander.expand("%APPDATA%/mpv/scripts/").unwrap(),
			r"C:\Users\me\AppData\Roaming\mpv\scripts\"
		);
		assert_eq!(expander.expand("D:/mpv").unwrap(), r"D:\mpv");
	}

	#[test]
	fn windows_expander_on_a_posix_host_uses_forward_slashes() {
		let expander = WindowsExpander::new(Some("/mnt/win/AppData/Roaming".to_owned())).with_host_separator('/');
		assert_eq!(
			expander.expand(PlatformKind::Windows.default_path_template()).unwrap(),
			"/mnt/win/AppData/Roaming/mpv/scripts/"
		);
	}

	#[test]
	fn windows_expander_without_appdata_rejects_placeholder() {
		let expander = WindowsExpander::new(None).with_host_separator('\\');
		assert!(matches!(
			expander.expand(PlatformKind::Windows.default_path_template()),
			Err(InstallError::InvalidPath(_))
		));
		assert_eq!(expander.expand(r"D:\mpv\").unwrap(), r"D:\mpv\");
	}

	#[test]
	fn posix_expander_only_touches_a_leading_tilde() {
		let expander = PosixExpander::new(Some("/home/me/".to_owned()));
		assert_eq!(
			expander.expand("~/.config/mpv/scripts/").unwrap(),
			"/home/me/.config/mpv/scripts/"
		);
		assert_eq!(expander.expand("~").unwrap(), "/home/me");
		assert_eq!(expander.expand("/srv/a~b/").unwrap(), "/srv/a~b/");
		assert_eq!(expander.expand("~other/x").unwrap(), "~other/x");
	}

	#[test]
	fn posix_expander_without_home_rejects_tilde() {
		let expander = PosixExpander::new(None);
		assert!(matches!(expander.expand("~/x"), Err(InstallError::InvalidPath(_))));
	}

	#[test]
	fn tilde_with_root_home_is_root() {
		let expander = PosixExpander::new(Some("/".to_owned()));
		assert_eq!(expander.expand("~").unwrap(), "/");
		assert_eq!(expander.expand("~/").unwrap(), "/");
		assert_eq!(expander.expand("~/mpv").unwrap(), "/mpv");
	}
}
