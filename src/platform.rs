// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

//! Description of the host the loader runs on.
//!
//! A [`Platform`] is computed once (usually through [`Platform::current`]) and handed to
//! [`NativeLoader`](crate::NativeLoader), so tests can describe any host they like.

use std::{env, fmt, path};

/// Overrides the detected application directory when set to a non-empty value.
pub const APP_DIR_ENV: &str = "NATIVE_LOADER_APP_DIR";
/// Overrides the detected runtime identifier when set to a non-empty value.
pub const RID_ENV: &str = "NATIVE_LOADER_RID";

/// Operating system family, which decides the native loader API in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
	Windows,
	MacOsx,
	/// Linux and every other unix-like host.
	Linux,
}

impl PlatformKind {
	/// The family this crate was compiled for.
	pub const fn current() -> Self {
		if cfg!(windows) {
			Self::Windows
		} else if cfg!(any(target_os = "macos", target_os = "ios")) {
			Self::MacOsx
		} else {
			Self::Linux
		}
	}
}

impl fmt::Display for PlatformKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Windows => "windows",
			Self::MacOsx => "macos",
			Self::Linux => "linux",
		})
	}
}

/// Everything the search algorithm needs to know about the running process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
	kind: PlatformKind,
	is_64bit: bool,
	rid: String,
	app_dir: path::PathBuf,
}

impl Platform {
	/// Describes an arbitrary host. Never reads the environment.
	pub fn new(
		kind: PlatformKind,
		is_64bit: bool,
		rid: impl Into<String>,
		app_dir: impl Into<path::PathBuf>,
	) -> Self {
		Self {
			kind,
			is_64bit,
			rid: rid.into(),
			app_dir: app_dir.into(),
		}
	}

	/// Detects the running host.
	///
	/// The application directory is the directory holding the current executable, or `.`
	/// if that cannot be determined. [`APP_DIR_ENV`] and [`RID_ENV`] override the
	/// detected values.
	pub fn current() -> Self {
		let kind = PlatformKind::current();
		let is_64bit = cfg!(target_pointer_width = "64");
		let rid = env_override(RID_ENV).unwrap_or_else(|| default_rid(kind, is_64bit));
		let app_dir = env_override(APP_DIR_ENV)
			.map(path::PathBuf::from)
			.unwrap_or_else(exe_dir);
		Self {
			kind,
			is_64bit,
			rid,
			app_dir,
		}
	}

	#[inline]
	pub fn kind(&self) -> PlatformKind {
		self.kind
	}

	#[inline]
	pub fn is_64bit(&self) -> bool {
		self.is_64bit
	}

	/// Runtime identifier used for `runtimes/<rid>/native/` lookups.
	#[inline]
	pub fn rid(&self) -> &str {
		&self.rid
	}

	#[inline]
	pub fn app_dir(&self) -> &path::Path {
		&self.app_dir
	}

	/// Architecture subdirectory searched on windows and linux.
	#[inline]
	pub fn arch_dir(&self) -> &'static str {
		if self.is_64bit {
			"x64"
		} else {
			"x86"
		}
	}
}

fn env_override(key: &str) -> Option<String> {
	env::var(key).ok().filter(|value| !value.is_empty())
}

fn exe_dir() -> path::PathBuf {
	env::current_exe()
		.ok()
		.and_then(|exe| exe.parent().map(path::Path::to_path_buf))
		.unwrap_or_else(|| path::PathBuf::from("."))
}

fn default_rid(kind: PlatformKind, is_64bit: bool) -> String {
	let os = match kind {
		// bundles ship a single universal directory
		PlatformKind::MacOsx => return "osx".to_owned(),
		PlatformKind::Windows => "win",
		PlatformKind::Linux => "linux",
	};
	let arch = if cfg!(any(target_arch = "x86_64", target_arch = "x86")) {
		if is_64bit {
			"x64"
		} else {
			"x86"
		}
	} else if cfg!(target_arch = "aarch64") {
		"arm64"
	} else if cfg!(target_arch = "arm") {
		"arm"
	} else {
		env::consts::ARCH
	};
	format!("{os}-{arch}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arch_dir_follows_bitness() {
		assert_eq!(Platform::new(PlatformKind::Linux, true, "linux-x64", "/app").arch_dir(), "x64");
		assert_eq!(Platform::new(PlatformKind::Windows, false, "win-x86", "C:\\app").arch_dir(), "x86");
	}

	#[test]
	fn current_kind_matches_target() {
		let kind = PlatformKind::current();
		if cfg!(windows) {
			assert_eq!(kind, PlatformKind::Windows);
		} else if cfg!(target_os = "macos") {
			assert_eq!(kind, PlatformKind::MacOsx);
		} else {
			assert_eq!(kind, PlatformKind::Linux);
		}
	}

	#[test]
	fn default_rids() {
		assert_eq!(default_rid(PlatformKind::MacOsx, true), "osx");
		if cfg!(target_arch = "x86_64") {
			assert_eq!(default_rid(PlatformKind::Linux, true), "linux-x64");
			assert_eq!(default_rid(PlatformKind::Windows, true), "win-x64");
		}
		if cfg!(target_arch = "x86") {
			assert_eq!(default_rid(PlatformKind::Linux, false), "linux-x86");
		}
	}

	#[test]
	fn current_has_app_dir() {
		let platform = Platform::current();
		assert!(!platform.app_dir().as_os_str().is_empty());
		assert!(!platform.rid().is_empty());
	}
}
