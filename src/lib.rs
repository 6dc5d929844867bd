// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
#![allow(clippy::missing_safety_doc)]

//! Run-time loading of native libraries shipped next to an application.
//!
//! [`NativeLoader::load_library_ext`] turns a library file name into a handle by trying
//! the application's architecture directory, its `runtimes/<rid>/native` directory, the
//! application directory itself and finally the system search path.
//! [`NativeLoader::load_function`] binds exports to typed function pointers.
//!
//! ```no_run
//! use native_loader::*;
//!
//! static LIBC: sync::LazyLibrary = sync::LazyLibrary::new(&["libc.so.6"]);
//!
//! #[native_import(library = LIBC)]
//! extern "C" {
//! 	fn abs(n: std::ffi::c_int) -> std::ffi::c_int;
//! }
//!
//! assert_eq!(unsafe { abs(-3) }, 3);
//! ```

extern crate self as native_loader;

pub mod error;
pub mod load;
mod library;
mod loader;
mod os;
pub mod platform;
pub mod search;
mod sym;
pub mod sync;

pub use error::{Error, ErrorKind};
pub use library::LibraryHandle;
pub use loader::NativeLoader;
pub use native_loader_macro::native_import;
pub use sym::Symbol;

/// The result of a native loader function.
pub type Result<T> = std::result::Result<T, error::Error>;
