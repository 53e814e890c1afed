//! Screen catalog and identity management.
//!
//! This module provides:
//! - `Metascreens`, the catalog that owns every screen variant
//! - fix activation, unlocking screens gated behind ROM patches
//! - renumbering, moving screens between ids while keeping the ROM in sync
//! - diagnostics and snapshots over the catalog's state
//!
//! Screens share non-unique ids; the catalog never collapses same-id
//! variants; choosing among them is left to the map generator.

mod catalog;
mod context;
mod diagnostics;
mod error;
mod fix;
mod renumber;
mod snapshot;

pub use catalog::Metascreens;
pub use context::{FixUpdate, GenerateContext};
pub use diagnostics::ExitTypeWarning;
pub use error::CatalogError;
pub use snapshot::{CatalogSnapshot, ScreenSnapshot};
