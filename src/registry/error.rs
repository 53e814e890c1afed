//! Error types for catalog operations

use thiserror::Error;

use crate::models::{ScreenFix, ScreenId};

/// Error from a catalog operation.
///
/// `DuplicateId`, `MissingSeed` and `UnknownScreen` are raised before any
/// mutation and leave the catalog untouched. `InconsistentState` means a
/// renumber failed part way; the catalog refuses further mutation after it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Renumber target id already has screens
    #[error("ID already used: {id}: {names}")]
    DuplicateId { id: ScreenId, names: String },
    /// A fix hook needs a seed and none was given
    #[error("Fix '{fix}' requires a seed (needed by screen '{screen}')")]
    MissingSeed { fix: ScreenFix, screen: String },
    /// Renumber source has no stored tiles to carry over
    #[error("No stored screen for id {0}")]
    UnknownScreen(ScreenId),
    /// Catalog indices or the screen store were left partially updated
    #[error("Catalog is in an inconsistent state: {0}")]
    InconsistentState(String),
}

impl CatalogError {
    /// Whether the catalog is still usable after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CatalogError::InconsistentState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_message() {
        let err = CatalogError::DuplicateId {
            id: ScreenId::Real(0x0c),
            names: "desertCaveEntrance, desertCaveEntranceAlt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ID already used: 0x0c: desertCaveEntrance, desertCaveEntranceAlt"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_inconsistent_state_is_fatal() {
        assert!(!CatalogError::InconsistentState("x".into()).is_recoverable());
    }
}
