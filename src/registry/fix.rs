//! Fix activation: unlocking screens gated behind ROM patches.

use tracing::debug;

use crate::models::{ScreenFix, ScreenHandle};
use crate::rom::{ScreenStore, Tilesets};

use super::catalog::activate;
use super::context::FixUpdate;
use super::error::CatalogError;
use super::Metascreens;

impl Metascreens {
    /// Register `fix` as applied and unlock the screens gated behind it.
    ///
    /// Every screen indexed under `fix` first runs its update hook for
    /// `fix`, if it has one; a hook returning `false` skips that screen.
    /// Otherwise `fix` is removed from each of the screen's tileset
    /// requirement lists, and a list that becomes empty adds the screen to
    /// its tileset.
    ///
    /// Fails with `MissingSeed`, before touching anything, if a hook needs a
    /// seed and `seed` is `None`. Registering a fix twice runs the hooks
    /// again.
    pub fn register_fix<R: Tilesets + ScreenStore>(
        &mut self,
        fix: ScreenFix,
        seed: Option<u32>,
        rom: &mut R,
    ) -> Result<(), CatalogError> {
        self.check_usable()?;

        let gated = self.by_fix.get(&fix).cloned().unwrap_or_default();
        if seed.is_none() {
            let needs_seed = gated.iter().map(|uid| &self.screens[uid.index()]).find(|screen| {
                screen.update_for(fix).map_or(false, |update| update.requires_seed)
            });
            if let Some(screen) = needs_seed {
                return Err(CatalogError::MissingSeed { fix, screen: screen.name.clone() });
            }
        }

        for uid in gated {
            let handle = ScreenHandle::new(uid);
            if let Some(update) = self.screens[uid.index()].update_for(fix).cloned() {
                let mut ctx = FixUpdate::new(handle, seed, &mut self.screens, rom);
                if !(update.apply)(&mut ctx) {
                    if self.config.debug {
                        debug!("fix {} declined by {}", fix, self.screens[uid.index()].name);
                    }
                    continue;
                }
            }

            let screen = &mut self.screens[uid.index()];
            let mut unlocked = Vec::new();
            for (&tileset, requirement) in screen.tilesets.iter_mut() {
                if !requirement.requires.contains(&fix) {
                    continue;
                }
                requirement.requires.retain(|&f| f != fix);
                if requirement.requires.is_empty() {
                    unlocked.push(tileset);
                }
            }
            for tileset in unlocked {
                if self.config.debug {
                    debug!("fix {} unlocks {} in {}", fix, screen.name, tileset);
                }
                activate(screen, handle, tileset, rom);
            }
        }

        self.fixed.insert(fix);
        Ok(())
    }
}
