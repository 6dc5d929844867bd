// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::os::windows::ffi::OsStrExt;
use std::{ffi, io, ptr};

use crate::{LibraryHandle, Symbol};

mod c;

fn to_wide(path: &ffi::OsStr) -> io::Result<Vec<u16>> {
	let wide: Vec<u16> = path.encode_wide().chain(std::iter::once(0u16)).collect();
	if wide[..wide.len() - 1].contains(&0) {
		Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			"library path contains an interior nul",
		))
	} else {
		Ok(wide)
	}
}

// Flags of zero give the classic `LoadLibraryW` search order.
#[inline]
pub(super) unsafe fn dylib_open(path: &ffi::OsStr) -> io::Result<LibraryHandle> {
	let wide_str: Vec<u16> = to_wide(path)?;
	let handle = c::LoadLibraryExW(wide_str.as_ptr(), ptr::null_mut(), 0);
	LibraryHandle::from_raw(handle).ok_or_else(io::Error::last_os_error)
}

#[inline]
pub(super) unsafe fn dylib_symbol(lib_handle: LibraryHandle, name: &str) -> io::Result<Symbol> {
	let c_str = ffi::CString::new(name)?;
	let addr = c::GetProcAddress(lib_handle.as_ptr(), c_str.as_ptr());
	Symbol::from_raw(addr).ok_or_else(io::Error::last_os_error)
}
