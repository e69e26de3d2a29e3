//! Settings Store: Hierarchical Application Settings
//!
//! A dynamically-typed settings tree with deep merge and a case-preserving
//! INI ingestion pipeline that types raw values (null, booleans, integers,
//! floats, complex numbers, strings).

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod merge;
pub mod store;
pub mod value;

pub use error::{ParseError, SettingsError};
pub use ingest::{coerce, ConfigIngestor, GLOBALS_SECTION};
pub use merge::{merge_nested, MergePolicy};
pub use store::{SettingsStore, SettingsStoreBuilder};
pub use value::{Complex, SettingKind, SettingValue, SettingsTree};
