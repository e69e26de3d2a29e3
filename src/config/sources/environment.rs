//! Environment source: `SETTINGS_STORE_<KEY>`, nested keys joined with `__`
//! (`SETTINGS_STORE_LOGGING__LEVEL=debug`).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "SETTINGS_STORE";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__"),
    )
}
