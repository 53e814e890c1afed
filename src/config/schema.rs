//! Configuration schema types for `metascreens.toml`
//!
//! Defines the catalog settings and the patch plan (fixes to register and
//! ids to renumber) applied after the catalog is built.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{ScreenFix, ScreenId, TilesetName};

/// Catalog settings section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Emit debug traces for construction, fix activation and renumbering
    #[serde(default)]
    pub debug: bool,
}

impl CatalogConfig {
    pub fn debug() -> Self {
        Self { debug: true }
    }
}

/// One fix to register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixStep {
    pub name: ScreenFix,
    /// Seed passed to the fix's update hooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

/// One renumber to perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenumberStep {
    pub from: ScreenId,
    pub to: ScreenId,
    /// Only move screens listing one of these tilesets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilesets: Option<Vec<TilesetName>>,
}

/// Root configuration structure for metascreens.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetascreensConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Fixes, registered in order
    #[serde(default, rename = "fix")]
    pub fixes: Vec<FixStep>,
    /// Renumbers, performed in order after every fix
    #[serde(default, rename = "renumber")]
    pub renumbers: Vec<RenumberStep>,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl MetascreensConfig {
    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for (i, step) in self.fixes.iter().enumerate() {
            if !seen.insert(step.name) {
                errors.push(ConfigValidationError {
                    field: format!("fix[{}].name", i),
                    message: format!("fix '{}' is listed more than once", step.name),
                });
            }
        }

        for (i, step) in self.renumbers.iter().enumerate() {
            if step.tilesets.as_ref().map_or(false, Vec::is_empty) {
                errors.push(ConfigValidationError {
                    field: format!("renumber[{}].tilesets", i),
                    message: "tileset filter is empty; omit it to move every screen".to_string(),
                });
            }
        }

        errors
    }
}
