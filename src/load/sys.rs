// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use super::*;
use crate::os;

unsafe impl Loader for System {
	#[inline]
	unsafe fn open(&self, path: &OsStr) -> io::Result<LibraryHandle> {
		os::dylib_open(self.kind, path)
	}

	#[inline]
	unsafe fn sym(&self, lib_handle: LibraryHandle, name: &str) -> io::Result<Symbol> {
		os::dylib_symbol(self.kind, lib_handle, name)
	}
}
