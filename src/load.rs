// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::ffi::OsStr;
use std::io;

use crate::platform::PlatformKind;
use crate::{LibraryHandle, Symbol};

mod sys;

/// The two primitives every platform adapter provides.
///
/// [`System`] is the native implementation. `Loader` can also be used to make custom
/// loaders, which is how the search order is exercised without touching the filesystem.
///
/// # Safety
/// Implementors must only hand out handles and symbols that came from a successful
/// open or lookup, and must report every failure through `Err` instead of panicking,
/// so the caller can move on to its next candidate.
pub unsafe trait Loader {
	/// Attempts to open a shared library by path or bare name.
	unsafe fn open(&self, path: &OsStr) -> io::Result<LibraryHandle>;
	/// Retrieves an exported symbol from an open library.
	unsafe fn sym(&self, lib_handle: LibraryHandle, name: &str) -> io::Result<Symbol>;
}

/// The operating system's own loader: `LoadLibraryExW`/`GetProcAddress` on windows,
/// `dlopen(RTLD_LAZY)`/`dlsym` everywhere else.
///
/// The adapter is chosen by the [`PlatformKind`] given at construction. Asking for a
/// family the host cannot provide yields `ErrorKind::Unsupported` on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct System {
	kind: PlatformKind,
}

impl System {
	#[inline]
	pub const fn new(kind: PlatformKind) -> Self {
		Self { kind }
	}

	#[inline]
	pub const fn kind(&self) -> PlatformKind {
		self.kind
	}
}

impl Default for System {
	fn default() -> Self {
		Self::new(PlatformKind::current())
	}
}
