#![cfg(target_os = "linux")]

use native_loader::platform::{Platform, PlatformKind};
use native_loader::*;
use std::path::PathBuf;

static LIBC: sync::LazyLibrary = sync::LazyLibrary::new(&["libc.so.6", "libc.so"]);

// Path of the libc mapped into this process.
fn mapped_libc() -> Option<PathBuf> {
	let maps = std::fs::read_to_string("/proc/self/maps").ok()?;
	maps.lines()
		.filter_map(|line| line.split_whitespace().nth(5))
		.find(|path| path.contains("/libc.so") || path.contains("/libc-"))
		.map(PathBuf::from)
}

fn app_platform(app_dir: &std::path::Path) -> Platform {
	Platform::new(
		PlatformKind::Linux,
		cfg!(target_pointer_width = "64"),
		"linux-x64",
		app_dir,
	)
}

#[test]
fn test_atoi_linux() {
	use std::ffi::{c_char, c_int};
	#[native_import(library = LIBC)]
	extern "C" {
		fn atoi(s: *const c_char) -> c_int;
	}

	let five = unsafe { atoi(b"5\0".as_ptr().cast()) };
	assert_eq!(five, 5);
}

#[test]
fn test_system_search() {
	let loader = NativeLoader::system();
	let lib = loader.load_library_ext("libc.so.6").unwrap();
	let again = loader.load_library_ext("libc.so.6").unwrap();
	// dlopen reference counts, so the same library gives the same handle
	assert_eq!(lib, again);
}

#[test]
fn test_load_function() {
	use std::ffi::{c_char, c_int};
	let loader = NativeLoader::system();
	let lib = loader.load_library_ext("libc.so.6").unwrap();
	let atoi: unsafe extern "C" fn(*const c_char) -> c_int =
		unsafe { loader.load_function(lib, "atoi", true) }.unwrap().unwrap();
	assert_eq!(unsafe { atoi(b"42\0".as_ptr().cast()) }, 42);

	let missing = unsafe { loader.load_function::<unsafe extern "C" fn()>(lib, "missing_symbol", false) };
	assert!(missing.unwrap().is_none());
}

#[test]
fn test_flat_app_dir() {
	let libc = mapped_libc().expect("libc is not mapped into the test process");
	let app_dir = tempfile::tempdir().unwrap();
	std::os::unix::fs::symlink(&libc, app_dir.path().join("libfoo.so")).unwrap();

	let loader = NativeLoader::new(app_platform(app_dir.path()), load::System::default());
	let lib = loader.load_library_ext("libfoo.so").unwrap();
	let atoi: unsafe extern "C" fn(*const std::ffi::c_char) -> std::ffi::c_int =
		unsafe { loader.load_function(lib, "atoi", true) }.unwrap().unwrap();
	assert_eq!(unsafe { atoi(b"17\0".as_ptr().cast()) }, 17);
}

#[test]
fn test_runtimes_dir() {
	let libc = mapped_libc().expect("libc is not mapped into the test process");
	let app_dir = tempfile::tempdir().unwrap();
	let native = app_dir.path().join("runtimes").join("linux-x64").join("native");
	std::fs::create_dir_all(&native).unwrap();
	std::os::unix::fs::symlink(&libc, native.join("libbar.so")).unwrap();

	let loader = NativeLoader::new(app_platform(app_dir.path()), load::System::default());
	let lib = loader.load_library_ext("libbar.so").unwrap();
	// same object as the libc already mapped, so the same handle
	assert_eq!(lib, loader.load_library(&libc).unwrap());
}

#[test]
fn test_not_a_library() {
	let app_dir = tempfile::tempdir().unwrap();
	std::fs::write(app_dir.path().join("libjunk.so"), b"not an elf file").unwrap();

	let loader = NativeLoader::new(app_platform(app_dir.path()), load::System::default());
	let err = loader.load_library_ext("libjunk.so").unwrap_err();
	let Error::LibNotFound { attempts, .. } = err else {
		unreachable!();
	};
	// the file exists but cannot be loaded, so the search moves on
	assert_eq!(attempts.len(), 4);
	assert_eq!(attempts[2].path, app_dir.path().join("libjunk.so"));
}
