use native_loader::platform::{self, Platform};
use std::path::Path;

// Runs alone in its own test binary since it edits the environment.
#[test]
fn test_env_overrides() {
	std::env::set_var(platform::APP_DIR_ENV, "/opt/game");
	std::env::set_var(platform::RID_ENV, "linux-musl-x64");
	let overridden = Platform::current();
	assert_eq!(overridden.app_dir(), Path::new("/opt/game"));
	assert_eq!(overridden.rid(), "linux-musl-x64");

	std::env::set_var(platform::APP_DIR_ENV, "");
	std::env::remove_var(platform::RID_ENV);
	let detected = Platform::current();
	assert_ne!(detected.app_dir(), Path::new(""));
	let exe_dir = std::env::current_exe().unwrap();
	assert_eq!(detected.app_dir(), exe_dir.parent().unwrap());
	assert_ne!(detected.rid(), "linux-musl-x64");
}
