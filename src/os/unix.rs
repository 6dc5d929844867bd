// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use crate::{LibraryHandle, Symbol};
use std::os::unix::ffi::OsStrExt;
use std::{ffi, io};

#[cfg(not(any(target_os = "linux", target_os = "macos", target_env = "gnu")))]
use std::sync;

// `dlerror` is only thread local on some libcs.
#[cfg(not(any(target_os = "linux", target_os = "macos", target_env = "gnu")))]
#[inline]
fn dylib_guard<'a>() -> sync::MutexGuard<'a, ()> {
	static LOCK: sync::Mutex<()> = sync::Mutex::new(());
	LOCK.lock().unwrap_or_else(sync::PoisonError::into_inner)
}

#[cfg(any(target_os = "linux", target_os = "macos", target_env = "gnu"))]
#[inline(always)]
fn dylib_guard() {}

unsafe fn dylib_error() -> io::Error {
	let msg = libc::dlerror();
	if msg.is_null() {
		io::Error::new(io::ErrorKind::Other, "unknown dynamic loader error")
	} else {
		let e = ffi::CStr::from_ptr(msg).to_string_lossy().into_owned();
		io::Error::new(io::ErrorKind::Other, e)
	}
}

unsafe fn map_result<F>(f: F) -> io::Result<*mut ffi::c_void>
where
	F: FnOnce() -> *mut ffi::c_void,
{
	let _lock = dylib_guard();
	let _ = libc::dlerror(); // clear existing errors
	let handle: *mut ffi::c_void = f();
	if handle.is_null() {
		Err(dylib_error())
	} else {
		Ok(handle)
	}
}

// Lazy binding: the library's own undefined symbols resolve on first call.
pub(super) unsafe fn dylib_open(path: &ffi::OsStr) -> io::Result<LibraryHandle> {
	let c_str = ffi::CString::new(path.as_bytes())?;
	let handle = map_result(|| libc::dlopen(c_str.as_ptr(), libc::RTLD_LAZY))?;
	Ok(LibraryHandle::from_raw(handle).unwrap_unchecked())
}

pub(super) unsafe fn dylib_symbol(lib_handle: LibraryHandle, name: &str) -> io::Result<Symbol> {
	let c_str = ffi::CString::new(name)?;
	let addr = map_result(|| libc::dlsym(lib_handle.as_ptr(), c_str.as_ptr()))?;
	Ok(Symbol::from_raw(addr).unwrap_unchecked())
}
