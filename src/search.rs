// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

//! Candidate locations for a library, in the order they are tried.

use std::{fmt, path};

use crate::platform::{Platform, PlatformKind};

/// Why a location is on the search list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
	/// Next to the application (macos only tries this first).
	AppDir,
	/// `../Frameworks` of a macos application bundle.
	Frameworks,
	/// `x64/` or `x86/` below the application directory.
	ArchDir,
	/// `runtimes/<rid>/native/` multi-target asset layout.
	RuntimeNative,
	/// Bare name, resolved by the operating system's own search.
	System,
}

impl fmt::Display for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::AppDir => "app directory",
			Self::Frameworks => "bundle frameworks",
			Self::ArchDir => "architecture directory",
			Self::RuntimeNative => "runtime native assets",
			Self::System => "system search",
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	pub path: path::PathBuf,
	pub source: Source,
}

impl Candidate {
	fn new(path: path::PathBuf, source: Source) -> Self {
		Self { path, source }
	}
}

/// Builds the ordered search list for `libname`.
///
/// The list is recomputed on every call and may contain the same path twice
/// (macos tries the application directory both first and fourth).
pub fn candidates(platform: &Platform, libname: &str) -> Vec<Candidate> {
	let app_dir = platform.app_dir();
	let mut list = Vec::with_capacity(5);
	if platform.kind() == PlatformKind::MacOsx {
		list.push(Candidate::new(app_dir.join(libname), Source::AppDir));
		list.push(Candidate::new(
			app_dir.join("..").join("Frameworks").join(libname),
			Source::Frameworks,
		));
	} else {
		list.push(Candidate::new(
			app_dir.join(platform.arch_dir()).join(libname),
			Source::ArchDir,
		));
	}
	list.push(Candidate::new(
		app_dir
			.join("runtimes")
			.join(platform.rid())
			.join("native")
			.join(libname),
		Source::RuntimeNative,
	));
	list.push(Candidate::new(app_dir.join(libname), Source::AppDir));
	list.push(Candidate::new(path::PathBuf::from(libname), Source::System));
	list
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn paths(list: &[Candidate]) -> Vec<PathBuf> {
		list.iter().map(|c| c.path.clone()).collect()
	}

	#[test]
	fn linux_order() {
		let platform = Platform::new(PlatformKind::Linux, true, "linux-x64", "/app");
		let list = candidates(&platform, "libfoo.so");
		assert_eq!(
			paths(&list),
			[
				PathBuf::from("/app/x64/libfoo.so"),
				PathBuf::from("/app/runtimes/linux-x64/native/libfoo.so"),
				PathBuf::from("/app/libfoo.so"),
				PathBuf::from("libfoo.so"),
			]
		);
		assert_eq!(list[3].source, Source::System);
	}

	#[test]
	fn thirty_two_bit_uses_x86() {
		let platform = Platform::new(PlatformKind::Linux, false, "linux-x86", "/app");
		let list = candidates(&platform, "libfoo.so");
		assert_eq!(list[0].path, PathBuf::from("/app/x86/libfoo.so"));
		assert_eq!(list[0].source, Source::ArchDir);
	}

	#[test]
	fn macos_order() {
		let platform = Platform::new(PlatformKind::MacOsx, true, "osx", "/Applications/Game.app/Contents/MacOS");
		let list = candidates(&platform, "libfoo.dylib");
		assert_eq!(
			paths(&list),
			[
				PathBuf::from("/Applications/Game.app/Contents/MacOS/libfoo.dylib"),
				PathBuf::from("/Applications/Game.app/Contents/MacOS/../Frameworks/libfoo.dylib"),
				PathBuf::from("/Applications/Game.app/Contents/MacOS/runtimes/osx/native/libfoo.dylib"),
				PathBuf::from("/Applications/Game.app/Contents/MacOS/libfoo.dylib"),
				PathBuf::from("libfoo.dylib"),
			]
		);
		let sources: Vec<Source> = list.iter().map(|c| c.source).collect();
		assert_eq!(
			sources,
			[
				Source::AppDir,
				Source::Frameworks,
				Source::RuntimeNative,
				Source::AppDir,
				Source::System
			]
		);
	}

	#[test]
	fn windows_order() {
		let platform = Platform::new(PlatformKind::Windows, true, "win-x64", "app");
		let list = candidates(&platform, "foo.dll");
		assert_eq!(
			paths(&list),
			[
				PathBuf::from("app").join("x64").join("foo.dll"),
				PathBuf::from("app")
					.join("runtimes")
					.join("win-x64")
					.join("native")
					.join("foo.dll"),
				PathBuf::from("app").join("foo.dll"),
				PathBuf::from("foo.dll"),
			]
		);
	}
}
