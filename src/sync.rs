// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::sync;

use crate::{Error, LibraryHandle, NativeLoader, Result, Symbol};

// Detected once for all lazily bound libraries.
fn system() -> &'static NativeLoader {
	static SYSTEM: sync::OnceLock<NativeLoader> = sync::OnceLock::new();
	SYSTEM.get_or_init(NativeLoader::system)
}

/// A native library resolved on first use and kept for the rest of the process.
///
/// This object is designed to be used with [`native_import`](crate::native_import).
#[derive(Debug)]
pub struct LazyLibrary {
	names: &'static [&'static str],
	hlib: sync::OnceLock<LibraryHandle>,
}

impl LazyLibrary {
	/// Constructs a new `LazyLibrary`.
	///
	/// This function accepts a slice of file names the library will attempt to load
	/// by priority (index `0` is highest), and every name is searched for with
	/// [`NativeLoader::load_library_ext`]. Only the first library successfully loaded
	/// will be used, which covers libraries shipped under different names per platform.
	///
	/// *Note: Symbols used in the libraries **must** be the same in all fallback names.*
	///
	/// # Examples
	///
	/// ```rust
	/// # use native_loader::*;
	/// static FREETYPE: sync::LazyLibrary =
	/// 	sync::LazyLibrary::new(&["freetype6.dll", "libfreetype.so.6", "libfreetype.6.dylib"]);
	/// ```
	#[inline]
	pub const fn new(names: &'static [&'static str]) -> Self {
		Self {
			names,
			hlib: sync::OnceLock::new(),
		}
	}

	/// Loads the library if no earlier call succeeded.
	///
	/// May block if another thread is currently initializing the handle. A failed load
	/// is not remembered, so the next call searches again.
	///
	/// # Errors
	/// Returns [`Error::LibNotFound`] listing the attempts for every name.
	pub fn handle(&self) -> Result<LibraryHandle> {
		if let Some(handle) = self.hlib.get() {
			return Ok(*handle);
		}
		let handle = self.load(system())?;
		Ok(*self.hlib.get_or_init(|| handle))
	}

	fn load(&self, loader: &NativeLoader) -> Result<LibraryHandle> {
		let mut attempts = Vec::new();
		for name in self.names {
			match loader.load_library_ext(name) {
				Ok(handle) => return Ok(handle),
				Err(Error::LibNotFound { attempts: tried, .. }) => attempts.extend(tried),
				Err(err) => return Err(err),
			}
		}
		Err(Error::LibNotFound {
			name: self.names.join(", "),
			attempts,
		})
	}

	/// Gets the handle if the library is already loaded. Never blocks.
	#[inline]
	pub fn get(&self) -> Option<LibraryHandle> {
		self.hlib.get().copied()
	}

	/// Looks up an export, loading the library first if needed.
	///
	/// # Errors
	/// Fails if the library cannot be loaded, or if the symbol is missing and `required`.
	pub fn symbol(&self, name: &str, required: bool) -> Result<Option<Symbol>> {
		let handle = self.handle()?;
		system().symbol(handle, name, required)
	}
}

/// A function pointer bound to an export of a [`LazyLibrary`] on first use.
///
/// `F` must be a function pointer type matching the export; this is checked for size
/// only. The [`native_import`](crate::native_import) macro declares these for you.
#[derive(Debug)]
pub struct LazyFn<F: Copy + 'static> {
	library: &'static LazyLibrary,
	name: &'static str,
	addr: sync::OnceLock<F>,
}

impl<F: Copy + 'static> LazyFn<F> {
	/// # Safety
	/// `F` must match the ABI and signature of the export called `name`.
	#[inline]
	pub const unsafe fn new(library: &'static LazyLibrary, name: &'static str) -> Self {
		Self {
			library,
			name,
			addr: sync::OnceLock::new(),
		}
	}

	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Binds the function, treating a missing export as an error.
	///
	/// # Errors
	/// Fails if the library cannot be loaded or does not export the function.
	pub fn get(&self) -> Result<F> {
		match self.bind(true)? {
			Some(f) => Ok(f),
			None => unreachable!("required lookups report missing symbols as errors"),
		}
	}

	/// Binds the function, returning `Ok(None)` if the library does not export it.
	///
	/// # Errors
	/// Fails if the library cannot be loaded.
	pub fn try_get(&self) -> Result<Option<F>> {
		self.bind(false)
	}

	fn bind(&self, required: bool) -> Result<Option<F>> {
		if let Some(f) = self.addr.get() {
			return Ok(Some(*f));
		}
		let Some(sym) = self.library.symbol(self.name, required)? else {
			return Ok(None);
		};
		// `new` is unsafe, so the caller vouched for `F`.
		let f = unsafe { sym.to_fn::<F>() };
		Ok(Some(*self.addr.get_or_init(|| f)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;

	static MISSING: LazyLibrary = LazyLibrary::new(&["native-loader-missing-a.so", "native-loader-missing-b.so"]);

	#[test]
	fn missing_library_reports_every_name() {
		let err = MISSING.handle().unwrap_err();
		assert_eq!(err.kind(), ErrorKind::LibNotFound);
		let Error::LibNotFound { name, attempts } = err else {
			panic!("unexpected error");
		};
		assert_eq!(name, "native-loader-missing-a.so, native-loader-missing-b.so");
		assert!(attempts.len() >= 8);
		assert!(MISSING.get().is_none());
	}

	#[test]
	fn missing_library_fn() {
		static FUNC: LazyFn<extern "C" fn()> = unsafe { LazyFn::new(&MISSING, "missing_fn") };
		assert_eq!(FUNC.try_get().unwrap_err().kind(), ErrorKind::LibNotFound);
		assert_eq!(FUNC.get().unwrap_err().kind(), ErrorKind::LibNotFound);
		assert_eq!(FUNC.name(), "missing_fn");
	}
}
