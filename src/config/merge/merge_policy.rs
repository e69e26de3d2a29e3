//! Merge rules: defaults, override order.
//!
//! Sources are layered in this order, later ones winning:
//! defaults, global config file, explicit `--config` file, environment.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::ingest::GLOBALS_SECTION;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("section", GLOBALS_SECTION)?
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")
}
