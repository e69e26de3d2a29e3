//! Configuration text ingestion
//!
//! Reads INI-style text, requires the reserved section and coerces every value
//! into a typed [`SettingValue`](crate::value::SettingValue). The result is a
//! flat settings tree ready to be merged into a store.

pub mod coerce;
pub mod parse;

pub use coerce::{coerce, is_number};
pub use parse::{IniDocument, Section, DEFAULT_SECTION};

use crate::error::SettingsError;
use crate::value::SettingsTree;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Section every configuration text must contain.
pub const GLOBALS_SECTION: &str = "globals";

/// Turns configuration text into flat, typed settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIngestor {
    section: String,
}

impl Default for ConfigIngestor {
    fn default() -> Self {
        Self::new(GLOBALS_SECTION)
    }
}

impl ConfigIngestor {
    /// Ingestor requiring `section` instead of `globals`.
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
        }
    }

    /// Name of the section this ingestor reads.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Ingest a complete document that carries its own section header.
    pub fn read_str(&self, text: &str) -> Result<SettingsTree, SettingsError> {
        let doc = IniDocument::parse(text)?;
        let items = doc
            .items(&self.section)
            .ok_or_else(|| SettingsError::MissingSection(self.section.clone()))?;

        let settings = coerce_all(items);

        debug!(
            section = %self.section,
            keys = settings.len(),
            "Ingested configuration text"
        );
        Ok(settings)
    }

    /// Ingest a document from a reader. The reader is drained in one buffered
    /// read before parsing starts.
    pub fn read_reader<R: Read>(&self, mut reader: R) -> Result<SettingsTree, SettingsError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.read_str(&text)
    }

    pub fn read_file(&self, path: &Path) -> Result<SettingsTree, SettingsError> {
        debug!(path = %path.display(), "Reading configuration file");
        let text = std::fs::read_to_string(path)?;
        self.read_str(&text)
    }

    /// Ingest bare `key = value` lines. The section header is synthesized, so
    /// callers only pass the settings themselves.
    pub fn read_fragment(&self, body: &str) -> Result<SettingsTree, SettingsError> {
        let text = format!("[{}]\n{}", self.section, body);
        self.read_str(&text)
    }
}

/// Coerce each raw value of an already-split mapping.
pub fn coerce_all<'a, I>(pairs: I) -> SettingsTree
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, raw)| (key.to_string(), coerce(raw)))
        .collect()
}
