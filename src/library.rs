// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::{ffi, ptr};

/// An opaque reference to a shared library opened by the operating system.
///
/// On unix this wraps the value returned by `dlopen`, on windows the `HMODULE` returned
/// by the module loader. A `LibraryHandle` is never null: failed opens are reported
/// through `Err`, so every handle in circulation came from a successful open call.
///
/// The handle is never closed by this crate. Its lifetime is the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct LibraryHandle(ptr::NonNull<ffi::c_void>);

// internal type is opaque and managed by OS, so it's `Send` and `Sync` safe
unsafe impl Send for LibraryHandle {}
unsafe impl Sync for LibraryHandle {}

impl LibraryHandle {
	/// Wraps a raw handle, returning `None` for the null sentinel.
	///
	/// # Safety
	/// `raw` must be null or a value returned by a successful open call of the
	/// platform loader (or of a custom [`Loader`](crate::load::Loader)).
	#[inline]
	pub unsafe fn from_raw(raw: *mut ffi::c_void) -> Option<Self> {
		ptr::NonNull::new(raw).map(Self)
	}

	/// Returns the raw OS handle.
	#[inline]
	pub const fn as_ptr(self) -> *mut ffi::c_void {
		self.0.as_ptr()
	}
}
