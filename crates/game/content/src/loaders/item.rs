//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use inventory_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| e.context(format!("in item catalog {}", path.display())))
    }

    /// Parse an item catalog from RON text.
    ///
    /// Keys must be unique within one catalog.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for item in &catalog.items {
            if !seen.insert(item.key.as_str()) {
                anyhow::bail!("Duplicate item key `{}` in catalog", item.key);
            }
        }

        tracing::debug!(
            target: "inventory::content",
            items = catalog.items.len(),
            "parsed item catalog"
        );
        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::{FragmentKind, IconFragment, SetStatsFragment};

    const CATALOG: &str = r#"(
        items: [
            (
                key: "Rock",
                display_name: "Rock",
                fragments: [
                    Icon((brush: "icons/rock.png")),
                ],
            ),
            (
                key: "Sword",
                display_name: "Iron Sword",
                stackable: false,
                fragments: [
                    SetStats((initial: {"durability": 100})),
                    Equippable((slot: "main_hand")),
                ],
            ),
        ],
    )"#;

    #[test]
    fn parses_fragments_in_declaration_order() {
        let items = ItemLoader::parse(CATALOG).unwrap();
        assert_eq!(items.len(), 2);

        let rock = &items[0];
        assert!(rock.stackable, "stackable defaults to true");
        assert_eq!(
            rock.fragment::<IconFragment>().map(|icon| icon.brush.as_str()),
            Some("icons/rock.png")
        );

        let sword = &items[1];
        assert!(!sword.stackable);
        assert_eq!(
            sword.fragment_kinds().collect::<Vec<_>>(),
            vec![FragmentKind::SetStats, FragmentKind::Equippable]
        );
        assert_eq!(
            sword
                .fragment::<SetStatsFragment>()
                .and_then(|stats| stats.initial.get("durability").copied()),
            Some(100)
        );
    }

    #[test]
    fn rejects_duplicate_keys() {
        let catalog = r#"(items: [
            (key: "Rock", display_name: "Rock"),
            (key: "Rock", display_name: "Other rock"),
        ])"#;
        let err = ItemLoader::parse(catalog).unwrap_err();
        assert!(err.to_string().contains("Duplicate item key `Rock`"));
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.ron");
        std::fs::write(&path, "(items: [ (key: ) ])").unwrap();

        let err = ItemLoader::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("items.ron"));
    }
}
