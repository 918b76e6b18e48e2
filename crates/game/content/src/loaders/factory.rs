//! Content factory for building registries from data files.

use std::path::{Path, PathBuf};

use inventory_core::{InventoryConfig, ItemDefinition};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads all inventory content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml   (optional)
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ITEMS_FILE: &'static str = "items.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load inventory configuration from `config.toml`.
    ///
    /// An absent file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<InventoryConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(
                target: "inventory::content",
                path = %path.display(),
                "no config file, using defaults"
            );
            return Ok(InventoryConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        let path = self.data_dir.join(Self::ITEMS_FILE);
        ItemLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
