//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::SettingsError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &SettingsError) -> String {
    match e {
        SettingsError::Lookup(name) => format!("No such setting: {}", name),
        other => other.to_string(),
    }
}

/// Process exit code for a failed command.
pub fn exit_code(e: &SettingsError) -> i32 {
    match e {
        SettingsError::Lookup(_) => 2,
        SettingsError::Parse(_) | SettingsError::MissingSection(_) => 3,
        _ => 1,
    }
}
