// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::{ffi, mem, ptr};

/// The address of an exported symbol.
///
/// A `Symbol` is only valid while the library it was resolved from stays loaded,
/// which for handles produced by this crate is the lifetime of the process.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Symbol(ptr::NonNull<ffi::c_void>);

unsafe impl Send for Symbol {}
unsafe impl Sync for Symbol {}

trait AssertSize<F> {
	const ASSERT_SIZE: () = assert!(
		mem::size_of::<F>() == mem::size_of::<*const ffi::c_void>(),
		"function type must be the size of a pointer"
	);
}
impl<F> AssertSize<F> for Symbol {}

impl Symbol {
	/// Wraps a raw address, returning `None` for the null sentinel.
	///
	/// # Safety
	/// `raw` must be null or an address returned by a successful symbol lookup.
	#[inline]
	pub unsafe fn from_raw(raw: *mut ffi::c_void) -> Option<Self> {
		ptr::NonNull::new(raw).map(Self)
	}

	/// Casts to a pointer of another type.
	#[inline]
	pub const fn cast<T>(self) -> *mut T {
		self.0.as_ptr().cast()
	}

	/// Reinterprets the address as a function pointer of type `F`.
	///
	/// The only guarantee this crate gives is that the address was exported under the
	/// requested name. Nothing about the signature is checked.
	///
	/// # Safety
	/// `F` must be a function pointer type (or a `#[repr(transparent)]` wrapper of one)
	/// whose ABI and signature match the exported function. A non pointer-sized `F`
	/// is rejected at compile time.
	#[inline]
	pub unsafe fn to_fn<F: Copy>(self) -> F {
		// `AssertSize` asserts sizeof(F) = sizeof(*c_void), so `transmute_copy` is safe.
		#[allow(clippy::let_unit_value)]
		let _ = <Self as AssertSize<F>>::ASSERT_SIZE;
		let addr: *mut ffi::c_void = self.0.as_ptr();
		mem::transmute_copy(&addr)
	}
}
