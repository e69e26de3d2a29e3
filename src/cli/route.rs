//! CLI route: single route table and run context. Builds stores from the
//! requested sources and hands results to presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{Commands, SourceArgs};
use crate::cli::presentation::{format_coercion, format_tree, format_value};
use crate::config::{ConfigLoader, ToolConfig};
use crate::error::SettingsError;
use crate::ingest::coerce;
use crate::store::SettingsStore;
use crate::value::{tree_from_json_str, tree_from_toml_str, SettingsTree};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: resolved tool configuration.
pub struct RunContext {
    config: ToolConfig,
}

impl RunContext {
    /// Create run context from an optional config path and section override.
    pub fn new(config_path: Option<PathBuf>, section: Option<String>) -> Result<Self, SettingsError> {
        let mut config = ConfigLoader::load(config_path.as_deref())?;
        if let Some(section) = section {
            config.section = section;
            config.validate()?;
        }
        Ok(Self { config })
    }

    pub fn from_config(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, SettingsError> {
        let started = Instant::now();
        let result = match command {
            Commands::Show { sources, format } => {
                let store = self.build_store(sources)?;
                format_tree(store.settings(), format)
            }
            Commands::Get {
                name,
                sources,
                format,
            } => {
                let store = self.build_store(sources)?;
                let value = store.setting_path(name)?;
                format_value(name, value, format)
            }
            Commands::Coerce { token, format } => format_coercion(token, &coerce(token), format),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    /// Build a store: base file as the initial tree, then each INI file, then
    /// each `--set` fragment, all deep-merged in order.
    pub fn build_store(&self, sources: &SourceArgs) -> Result<SettingsStore, SettingsError> {
        let base = sources.base.clone();
        let mut store = SettingsStore::builder()
            .section(self.config.section.clone())
            .initializer(move |tree| {
                if let Some(path) = base {
                    *tree = load_tree_file(&path)?;
                }
                Ok(())
            })
            .build()?;

        for file in &sources.files {
            store.update_settings_from_config_file(file)?;
        }
        for fragment in &sources.sets {
            debug!(fragment = %fragment, "Applying override");
            store.update_settings_from_config_str(fragment)?;
        }
        Ok(store)
    }
}

/// Read a base tree: JSON for `.json` files, TOML otherwise.
fn load_tree_file(path: &Path) -> Result<SettingsTree, SettingsError> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        tree_from_json_str(&text)
    } else {
        tree_from_toml_str(&text)
    }
}
