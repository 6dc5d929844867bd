// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::{fmt, io, path};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	FnNotFound,
	LibNotFound,
}

/// One failed candidate during library resolution.
#[derive(Debug)]
pub struct Attempt {
	pub path: path::PathBuf,
	/// Whatever the OS reported for this candidate.
	pub reason: io::Error,
}

impl fmt::Display for Attempt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.path.display(), self.reason)
	}
}

#[derive(Debug, Error)]
pub enum Error {
	/// Every candidate location was tried and none could be opened.
	#[error("library `{name}` not found{}", Attempts(.attempts))]
	LibNotFound { name: String, attempts: Vec<Attempt> },
	/// A mandatory export is missing from a loaded library.
	#[error("entry point `{name}` not found: {reason}")]
	FnNotFound { name: String, reason: io::Error },
}

impl Error {
	#[inline]
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::LibNotFound { .. } => ErrorKind::LibNotFound,
			Self::FnNotFound { .. } => ErrorKind::FnNotFound,
		}
	}
}

struct Attempts<'a>(&'a [Attempt]);

impl fmt::Display for Attempts<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for attempt in self.0 {
			write!(f, "\n  tried {attempt}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lib_not_found_lists_attempts() {
		let err = Error::LibNotFound {
			name: "libfoo.so".to_owned(),
			attempts: vec![
				Attempt {
					path: "/app/x64/libfoo.so".into(),
					reason: io::Error::new(io::ErrorKind::NotFound, "no such file"),
				},
				Attempt {
					path: "libfoo.so".into(),
					reason: io::Error::new(io::ErrorKind::NotFound, "not in search path"),
				},
			],
		};
		assert_eq!(err.kind(), ErrorKind::LibNotFound);
		assert_eq!(
			err.to_string(),
			"library `libfoo.so` not found\n  tried /app/x64/libfoo.so: no such file\n  tried libfoo.so: not in search path"
		);
	}

	#[test]
	fn fn_not_found() {
		let err = Error::FnNotFound {
			name: "foo_init".to_owned(),
			reason: io::Error::new(io::ErrorKind::NotFound, "undefined symbol"),
		};
		assert_eq!(err.kind(), ErrorKind::FnNotFound);
		assert_eq!(err.to_string(), "entry point `foo_init` not found: undefined symbol");
	}
}
