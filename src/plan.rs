//! Applying a configured patch plan to a catalog.

use tracing::info;

use crate::config::MetascreensConfig;
use crate::registry::{CatalogError, Metascreens};
use crate::rom::Rom;

/// Register every configured fix, then perform every configured renumber.
///
/// Fix activation and renumbering are run as two separate batches, in that
/// order. Stops at the first error.
pub fn apply_plan<R: Rom>(
    catalog: &mut Metascreens,
    config: &MetascreensConfig,
    rom: &mut R,
) -> Result<(), CatalogError> {
    for step in &config.fixes {
        catalog.register_fix(step.name, step.seed, rom)?;
        info!("registered fix {}", step.name);
    }
    for step in &config.renumbers {
        catalog.renumber(step.from, step.to, step.tilesets.as_deref(), rom)?;
        info!("renumbered {} -> {}", step.from, step.to);
    }
    Ok(())
}
