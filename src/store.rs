//! Settings Store
//!
//! Owns one settings tree for its whole lifetime and applies point updates,
//! deep merges and text updates to it. A store only exists once its
//! initializer has populated the tree, so every accessor works on a ready tree.
//!
//! There is no internal locking. Callers sharing a store between threads must
//! serialize access themselves (for example behind a `Mutex`).

use crate::error::SettingsError;
use crate::ingest::ConfigIngestor;
use crate::merge::MergePolicy;
use crate::value::{lookup_path, SettingValue, SettingsTree};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Initialization hook: fills the freshly created tree.
///
/// The hook sees the tree it is building, so later settings may be derived
/// from earlier ones.
pub type Initializer = Box<dyn FnOnce(&mut SettingsTree) -> Result<(), SettingsError>>;

/// Hierarchical settings container.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: SettingsTree,
    ingestor: ConfigIngestor,
}

impl SettingsStore {
    /// Create a store whose tree is produced by `initialize`.
    ///
    /// Any error from the hook is reported as [`SettingsError::Initialization`].
    pub fn new<F>(initialize: F) -> Result<Self, SettingsError>
    where
        F: FnOnce(&mut SettingsTree) -> Result<(), SettingsError>,
    {
        Self::initialized(ConfigIngestor::default(), initialize)
    }

    /// Create a store around an already built tree.
    pub fn from_tree(settings: SettingsTree) -> Self {
        Self {
            settings,
            ingestor: ConfigIngestor::default(),
        }
    }

    pub fn builder() -> SettingsStoreBuilder {
        SettingsStoreBuilder::default()
    }

    fn initialized<F>(ingestor: ConfigIngestor, initialize: F) -> Result<Self, SettingsError>
    where
        F: FnOnce(&mut SettingsTree) -> Result<(), SettingsError>,
    {
        let mut settings = SettingsTree::new();
        initialize(&mut settings).map_err(|e| match e {
            SettingsError::Initialization(msg) => SettingsError::Initialization(msg),
            other => SettingsError::Initialization(other.to_string()),
        })?;
        debug!(
            keys = settings.len(),
            section = ingestor.section(),
            "Settings store initialized"
        );
        Ok(Self { settings, ingestor })
    }

    /// Ingestor used by the text update entry points.
    pub fn ingestor(&self) -> &ConfigIngestor {
        &self.ingestor
    }

    /// Value of the top-level setting `name`.
    pub fn setting(&self, name: &str) -> Result<&SettingValue, SettingsError> {
        self.settings
            .get(name)
            .ok_or_else(|| SettingsError::Lookup(name.to_string()))
    }

    /// Value of `name`, or `default` when the setting is absent.
    pub fn setting_or<'a>(&'a self, name: &str, default: &'a SettingValue) -> &'a SettingValue {
        self.settings.get(name).unwrap_or(default)
    }

    /// Value at a dotted path such as `db.port`.
    pub fn setting_path(&self, path: &str) -> Result<&SettingValue, SettingsError> {
        lookup_path(&self.settings, path).ok_or_else(|| SettingsError::Lookup(path.to_string()))
    }

    pub fn has_setting(&self, name: &str) -> bool {
        self.settings.contains_key(name)
    }

    /// Set a single top-level key. No merging, no check against the previous
    /// value's type.
    pub fn set_setting(&mut self, name: impl Into<String>, value: impl Into<SettingValue>) {
        let name = name.into();
        debug!(name = %name, "Setting value");
        self.settings.insert(name, value.into());
    }

    /// The live settings tree.
    pub fn settings(&self) -> &SettingsTree {
        &self.settings
    }

    /// Mutable access to the live tree.
    ///
    /// Writes made through this reference bypass merge semantics entirely. It
    /// exists for bulk pre-population; prefer [`update_settings`](Self::update_settings)
    /// for overrides.
    pub fn settings_mut(&mut self) -> &mut SettingsTree {
        &mut self.settings
    }

    /// Defensive copy of the current tree for read-only consumers.
    pub fn settings_snapshot(&self) -> SettingsTree {
        self.settings.clone()
    }

    /// Deep-merge `new_settings` into the tree.
    pub fn update_settings(&mut self, new_settings: SettingsTree) {
        debug!(keys = new_settings.len(), "Merging settings");
        MergePolicy::Deep.apply(&mut self.settings, new_settings);
    }

    /// Replace top-level keys of the tree with those of `new_settings`, without
    /// recursing into nested trees.
    pub fn overwrite_settings(&mut self, new_settings: SettingsTree) {
        debug!(keys = new_settings.len(), "Overwriting settings");
        MergePolicy::Shallow.apply(&mut self.settings, new_settings);
    }

    /// Ingest bare `key = value` lines and deep-merge the result.
    ///
    /// Nothing is merged unless the whole text parses.
    pub fn update_settings_from_config_str(&mut self, text: &str) -> Result<(), SettingsError> {
        let new_settings = self.ingestor.read_fragment(text)?;
        self.update_settings(new_settings);
        Ok(())
    }

    /// Ingest a complete document (with its section header) from a reader and
    /// deep-merge the result.
    pub fn update_settings_from_config_reader<R: Read>(
        &mut self,
        reader: R,
    ) -> Result<(), SettingsError> {
        let new_settings = self.ingestor.read_reader(reader)?;
        self.update_settings(new_settings);
        Ok(())
    }

    /// Ingest a configuration file and deep-merge the result.
    pub fn update_settings_from_config_file(&mut self, path: &Path) -> Result<(), SettingsError> {
        let new_settings = self.ingestor.read_file(path)?;
        self.update_settings(new_settings);
        Ok(())
    }
}

/// Builder for stores that need a non-default section name.
///
/// `build` fails with [`SettingsError::Initialization`] when no initializer was
/// supplied: a store never exists without defined initial settings.
#[derive(Default)]
pub struct SettingsStoreBuilder {
    section: Option<String>,
    initializer: Option<Initializer>,
}

impl SettingsStoreBuilder {
    /// Reserved section read by the text update entry points.
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn initializer<F>(mut self, initialize: F) -> Self
    where
        F: FnOnce(&mut SettingsTree) -> Result<(), SettingsError> + 'static,
    {
        self.initializer = Some(Box::new(initialize));
        self
    }

    /// Initial tree given directly instead of through a hook.
    pub fn initial_settings(self, settings: SettingsTree) -> Self {
        self.initializer(move |tree| {
            *tree = settings;
            Ok(())
        })
    }

    pub fn build(self) -> Result<SettingsStore, SettingsError> {
        let initialize = self.initializer.ok_or_else(|| {
            SettingsError::Initialization("no settings initializer supplied".to_string())
        })?;
        let ingestor = self
            .section
            .map(ConfigIngestor::new)
            .unwrap_or_default();
        SettingsStore::initialized(ingestor, initialize)
    }
}
