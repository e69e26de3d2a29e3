//! Tool Configuration
//!
//! Configuration of the `settings` command itself (which section to read, how
//! to log), layered from defaults, the global config file, an explicit file
//! and `SETTINGS_STORE_*` environment variables. This is separate from the
//! settings trees the store manages.

use crate::error::SettingsError;
use crate::logging::LoggingConfig;
use config::{File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod sources;

pub use sources::environment::ENV_PREFIX;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Reserved section read from configuration text
    #[serde(default = "default_section")]
    pub section: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_section() -> String {
    crate::ingest::GLOBALS_SECTION.to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            section: default_section(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.section.trim().is_empty() {
            return Err(SettingsError::Config("Section name cannot be empty".to_string()));
        }
        if self.section.contains(|c: char| matches!(c, '[' | ']' | '\n')) {
            return Err(SettingsError::Config(format!(
                "Section name {:?} cannot contain brackets or newlines",
                self.section
            )));
        }
        Ok(())
    }
}

/// Loads [`ToolConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path of the global config file, if the platform has a config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    /// Load configuration: defaults, global file, `explicit` file (required when
    /// given), then environment.
    pub fn load(explicit: Option<&Path>) -> Result<ToolConfig, SettingsError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder)?;

        if let Some(path) = explicit {
            debug!(config_path = %path.display(), "Using explicit configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = sources::environment::add_to_builder(builder);

        let config: ToolConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single TOML file, ignoring every other source.
    pub fn load_from_file(path: &Path) -> Result<ToolConfig, SettingsError> {
        let config: ToolConfig = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
