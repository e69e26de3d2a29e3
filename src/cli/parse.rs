//! CLI parse: clap types for the settings tool. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Settings CLI - layered settings from TOML/JSON bases and INI overrides
#[derive(Parser, Debug)]
#[command(name = "settings")]
#[command(about = "Build a settings tree from a base file and INI overrides, then inspect it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Tool configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reserved INI section to read (default: globals)
    #[arg(long, global = true)]
    pub section: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Where the settings tree comes from. Applied in order: base, files, sets.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Initial settings tree: TOML, or JSON when the extension is `.json`
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// INI file containing the reserved section; repeatable, merged in order
    #[arg(long = "file", value_name = "INI")]
    pub files: Vec<PathBuf>,

    /// Bare `key = value` override; repeatable, merged after files
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub sets: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the merged settings tree
    Show {
        #[command(flatten)]
        sources: SourceArgs,
        /// Output format (text, json or toml)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print one setting; nested settings are addressed with dots (`db.port`)
    Get {
        /// Setting name or dotted path
        name: String,
        #[command(flatten)]
        sources: SourceArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show how a raw token is typed
    Coerce {
        /// Raw token as it would appear after `=` in a config file
        #[arg(allow_hyphen_values = true)]
        token: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
