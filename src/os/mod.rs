// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

// One adapter per OS family. Which adapter runs is decided by the `PlatformKind`
// passed in, not by the object being loaded.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

use crate::{platform::PlatformKind, LibraryHandle, Symbol};
use std::{ffi, io};

fn unavailable(kind: PlatformKind) -> io::Error {
	io::Error::new(
		io::ErrorKind::Unsupported,
		format!("the {kind} loader is unavailable on this host"),
	)
}

pub(crate) unsafe fn dylib_open(kind: PlatformKind, path: &ffi::OsStr) -> io::Result<LibraryHandle> {
	match kind {
		PlatformKind::Windows => {
			#[cfg(windows)]
			{
				windows::dylib_open(path)
			}
			#[cfg(not(windows))]
			{
				let _ = path;
				Err(unavailable(kind))
			}
		}
		PlatformKind::MacOsx | PlatformKind::Linux => {
			#[cfg(unix)]
			{
				unix::dylib_open(path)
			}
			#[cfg(not(unix))]
			{
				let _ = path;
				Err(unavailable(kind))
			}
		}
	}
}

pub(crate) unsafe fn dylib_symbol(
	kind: PlatformKind,
	lib_handle: LibraryHandle,
	name: &str,
) -> io::Result<Symbol> {
	match kind {
		PlatformKind::Windows => {
			#[cfg(windows)]
			{
				windows::dylib_symbol(lib_handle, name)
			}
			#[cfg(not(windows))]
			{
				let _ = (lib_handle, name);
				Err(unavailable(kind))
			}
		}
		PlatformKind::MacOsx | PlatformKind::Linux => {
			#[cfg(unix)]
			{
				unix::dylib_symbol(lib_handle, name)
			}
			#[cfg(not(unix))]
			{
				let _ = (lib_handle, name);
				Err(unavailable(kind))
			}
		}
	}
}
