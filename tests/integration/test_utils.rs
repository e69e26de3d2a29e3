//! Shared test utilities for integration tests
//!
//! Provides file setup, an isolated `settings` command, and serialized access
//! to the environment variables the tool configuration reads.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static CONFIG_ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 4] = [
    "HOME",
    "XDG_CONFIG_HOME",
    "SETTINGS_STORE_SECTION",
    "SETTINGS_STORE_LOGGING__LEVEL",
];

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// `settings` binary with HOME and XDG_CONFIG_HOME pointed into `temp_dir`, so
/// no user configuration leaks into the run.
pub fn settings_command(temp_dir: &TempDir) -> Command {
    let home = temp_dir.path().join("home");
    let config_home = temp_dir.path().join("config");
    std::fs::create_dir_all(&home).unwrap();
    std::fs::create_dir_all(&config_home).unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_settings"));
    command
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &config_home)
        .env_remove("SETTINGS_STORE_SECTION")
        .env_remove("SETTINGS_LOG")
        .env_remove("SETTINGS_LOG_OUTPUT");
    command
}

/// Run `f` with an isolated XDG_CONFIG_HOME (`<temp>/config`), restoring the
/// original environment afterwards.
pub fn with_config_env<F>(f: F)
where
    F: FnOnce(&TempDir),
{
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = ENV_KEYS
        .iter()
        .map(|key| (*key, std::env::var(key).ok()))
        .collect();

    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_home).unwrap();
    std::env::set_var("HOME", temp_dir.path());
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::remove_var("SETTINGS_STORE_SECTION");
    std::env::remove_var("SETTINGS_STORE_LOGGING__LEVEL");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&temp_dir)));

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}
