//! Serializable view of the catalog's state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Flag, ScreenFix, ScreenId, TileSourceKind, TilesetName, TilesetRequirement, Uid};

use super::Metascreens;

/// State of one screen at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSnapshot {
    pub uid: Uid,
    pub name: String,
    pub id: ScreenId,
    pub tilesets: BTreeMap<TilesetName, TilesetRequirement>,
    pub active: Vec<TilesetName>,
    pub definition: TileSourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<Flag>,
}

/// Everything mutable in a catalog, for comparison and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub screens: Vec<ScreenSnapshot>,
    pub ids: BTreeMap<ScreenId, Vec<Uid>>,
    pub fixed: Vec<ScreenFix>,
}

impl Metascreens {
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            screens: self
                .screens
                .iter()
                .map(|s| ScreenSnapshot {
                    uid: s.uid,
                    name: s.name.clone(),
                    id: s.id,
                    tilesets: s.tilesets.clone(),
                    active: s.active.iter().copied().collect(),
                    definition: s.definition.kind(),
                    flag: s.flag,
                })
                .collect(),
            ids: self.by_id.clone(),
            fixed: self.fixed.iter().copied().collect(),
        }
    }
}
