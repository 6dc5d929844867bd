// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::{io, path::Path};

use tracing::{debug, info, info_span, trace, warn};

use crate::error::{Attempt, Error};
use crate::load::{Loader, System};
use crate::platform::Platform;
use crate::search;
use crate::{LibraryHandle, Result, Symbol};

/// Resolves bare library names against the application's layout.
///
/// The loader holds no mutable state. Handles it returns are never closed, so they stay
/// valid for the rest of the process and may be shared between threads as far as the
/// OS loader itself allows.
#[derive(Debug, Clone)]
pub struct NativeLoader<L: Loader = System> {
	platform: Platform,
	loader: L,
}

impl NativeLoader {
	/// A loader for the running host, using the OS loader.
	pub fn system() -> Self {
		let platform = Platform::current();
		let loader = System::new(platform.kind());
		Self { platform, loader }
	}
}

impl<L: Loader> NativeLoader<L> {
	/// Pairs a platform description with the adapter that performs the opens.
	pub fn new(platform: Platform, loader: L) -> Self {
		Self { platform, loader }
	}

	#[inline]
	pub fn platform(&self) -> &Platform {
		&self.platform
	}

	#[inline]
	pub fn loader(&self) -> &L {
		&self.loader
	}

	/// Opens exactly `path`, with no search of its own.
	pub fn load_library(&self, path: impl AsRef<Path>) -> io::Result<LibraryHandle> {
		unsafe { self.loader.open(path.as_ref().as_os_str()) }
	}

	/// Searches for `libname` and returns the first location that opens.
	///
	/// `libname` must already carry the platform's file name conventions
	/// (`foo.dll`, `libfoo.so`, `libfoo.dylib`). The candidates are, in order:
	///
	/// 1. macos: `<app>/<libname>`, then `<app>/../Frameworks/<libname>`;
	///    elsewhere: `<app>/x64/<libname>` or `<app>/x86/<libname>`
	/// 2. `<app>/runtimes/<rid>/native/<libname>`
	/// 3. `<app>/<libname>`
	/// 4. `<libname>`, left to the OS search path
	///
	/// A candidate that fails to open, for whatever reason, just moves the search on.
	///
	/// # Errors
	/// Returns [`Error::LibNotFound`] with every attempt when no candidate opens.
	pub fn load_library_ext(&self, libname: &str) -> Result<LibraryHandle> {
		let span = info_span!("load_library_ext", libname);
		let _enter = span.enter();
		debug!(app_dir = %self.platform.app_dir().display(), "searching for native library");

		let mut attempts = Vec::new();
		for candidate in search::candidates(&self.platform, libname) {
			// only for diagnostics, the open call alone decides
			let exists = candidate.path.exists();
			match self.load_library(&candidate.path) {
				Ok(handle) => {
					info!(path = %candidate.path.display(), source = %candidate.source, "loaded native library");
					return Ok(handle);
				}
				Err(reason) => {
					debug!(path = %candidate.path.display(), source = %candidate.source, exists, loaded = false, "candidate rejected");
					trace!(reason = %reason, "open failed");
					attempts.push(Attempt {
						path: candidate.path,
						reason,
					});
				}
			}
		}
		warn!(attempts = attempts.len(), "native library not found");
		Err(Error::LibNotFound {
			name: libname.to_owned(),
			attempts,
		})
	}

	/// Looks up an export of `lib_handle`.
	///
	/// A missing optional symbol is `Ok(None)`; a missing required one is
	/// [`Error::FnNotFound`].
	pub fn symbol(&self, lib_handle: LibraryHandle, name: &str, required: bool) -> Result<Option<Symbol>> {
		match unsafe { self.loader.sym(lib_handle, name) } {
			Ok(sym) => Ok(Some(sym)),
			Err(reason) if required => Err(Error::FnNotFound {
				name: name.to_owned(),
				reason,
			}),
			Err(reason) => {
				debug!(symbol = name, reason = %reason, "optional entry point not found");
				Ok(None)
			}
		}
	}

	/// Looks up an export and binds it to the function pointer type `F`.
	///
	/// Missing symbols follow the same policy as [`symbol`](Self::symbol).
	///
	/// # Safety
	/// `F` must be a function pointer type whose ABI and signature match the export.
	/// Only the name is verified.
	///
	/// # Examples
	///
	/// ```no_run
	/// use native_loader::NativeLoader;
	/// use std::ffi::{c_char, c_int};
	///
	/// let loader = NativeLoader::system();
	/// let libc = loader.load_library_ext("libc.so.6").unwrap();
	/// let atoi: unsafe extern "C" fn(*const c_char) -> c_int =
	/// 	unsafe { loader.load_function(libc, "atoi", true) }.unwrap().unwrap();
	/// ```
	pub unsafe fn load_function<F: Copy>(
		&self,
		lib_handle: LibraryHandle,
		name: &str,
		required: bool,
	) -> Result<Option<F>> {
		Ok(self.symbol(lib_handle, name, required)?.map(|sym| sym.to_fn::<F>()))
	}
}
