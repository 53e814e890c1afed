//! JSON screen tables.
//!
//! A screen table describes a catalog as plain data: the screens in
//! construction order, the stored tile bytes per id, and the locations that
//! reference screens. Tiles given on a screen entry become that screen's
//! own (materialized) tile source.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::CatalogConfig;
use crate::models::{ScreenData, ScreenId, TileSource};
use crate::registry::{CatalogError, Metascreens};
use crate::rom::{MemoryRom, ScreenStore};

/// Error loading or building a screen table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read screen table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse screen table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// One screen in a table.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScreenEntry {
    pub name: String,
    pub data: ScreenData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<u8>>,
}

/// A location in a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub screens: Vec<Vec<ScreenId>>,
}

/// A whole catalog as plain data.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScreenTable {
    #[serde(default)]
    pub screens: Vec<ScreenEntry>,
    #[serde(default)]
    pub stored: BTreeMap<ScreenId, Vec<u8>>,
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
}

impl ScreenTable {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a catalog and an in-memory ROM from this table.
    pub fn build(self, config: CatalogConfig) -> Result<(Metascreens, MemoryRom), LoadError> {
        let mut rom = MemoryRom::new();
        for (id, tiles) in self.stored {
            rom.set_screen(id, tiles);
        }
        for location in self.locations {
            rom.add_location(location.name, location.screens);
        }

        let mut catalog = Metascreens::new(config);
        for entry in self.screens {
            let mut data = entry.data;
            if let Some(tiles) = entry.tiles {
                data.definition = TileSource::Materialized(tiles);
            }
            catalog.metascreen(entry.name, data, &mut rom)?;
        }
        Ok((catalog, rom))
    }
}

/// Load a screen table from a JSON file.
pub fn load_table(path: &Path) -> Result<ScreenTable, LoadError> {
    let contents = fs::read_to_string(path)?;
    ScreenTable::from_json(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TileSourceKind, TilesetName};

    const TABLE: &str = r#"{
        "screens": [
            {"name": "desertCave", "data": {"id": 12, "tilesets": {"desert": {}}}},
            {"name": "desertRocks", "data": {"id": 12, "tilesets": {"desert": {"requires": ["desert-rocks"]}}}},
            {"name": "virtualArt", "data": {"id": -1}, "tiles": [4, 5]}
        ],
        "stored": {"12": [1, 2, 3], "-1": []},
        "locations": [{"name": "Sahara", "screens": [[12, 12]]}]
    }"#;

    #[test]
    fn test_build_table() {
        let table = ScreenTable::from_json(TABLE).unwrap();
        let (catalog, rom) = table.build(CatalogConfig::default()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get_by_id(ScreenId::Real(12), None).len(), 2);
        assert_eq!(catalog.get_by_id(ScreenId::Real(12), Some(TilesetName::Desert)).len(), 1);
        let art = catalog.by_name("virtualArt").unwrap();
        assert_eq!(catalog.screen(art).definition().kind(), TileSourceKind::Materialized);
        assert_eq!(rom.screen(ScreenId::Real(12)), Some(&[1u8, 2, 3][..]));
        assert_eq!(rom.screen(ScreenId::Virtual(0)), Some(&[][..]));
        assert_eq!(rom.locations()[0].name, "Sahara");
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(ScreenTable::from_json("{"), Err(LoadError::Json(_))));
    }
}
