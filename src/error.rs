//! Error types for the settings store.

use thiserror::Error;

/// Syntax errors raised while parsing INI-style configuration text.
///
/// Line numbers are 1-based and refer to the text handed to the parser, so a
/// fragment ingested with a synthesized section header reports one line more
/// than the caller wrote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: key/value line before any section header: {content:?}")]
    MissingSectionHeader { line: usize, content: String },

    #[error("line {line}: unterminated section header: {content:?}")]
    UnterminatedSectionHeader { line: usize, content: String },

    #[error("line {line}: empty section name")]
    EmptySectionName { line: usize },

    #[error("line {line}: expected `key = value` or `key: value`, got {content:?}")]
    MissingDelimiter { line: usize, content: String },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("line {line}: section [{name}] already defined")]
    DuplicateSection { line: usize, name: String },

    #[error("line {line}: key {key:?} already defined in section [{section}]")]
    DuplicateKey {
        line: usize,
        section: String,
        key: String,
    },
}

impl ParseError {
    /// Line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingSectionHeader { line, .. }
            | ParseError::UnterminatedSectionHeader { line, .. }
            | ParseError::EmptySectionName { line }
            | ParseError::MissingDelimiter { line, .. }
            | ParseError::EmptyKey { line }
            | ParseError::DuplicateSection { line, .. }
            | ParseError::DuplicateKey { line, .. } => *line,
        }
    }
}

/// Errors surfaced by the settings store and its ingestion pipeline.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Missing required section: [{0}]")]
    MissingSection(String),

    #[error("Setting not found: {0}")]
    Lookup(String),

    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for SettingsError {
    fn from(err: config::ConfigError) -> Self {
        SettingsError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(err: toml::de::Error) -> Self {
        SettingsError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(err: toml::ser::Error) -> Self {
        SettingsError::Serialization(err.to_string())
    }
}
