//! Views handed to screen closures while the catalog is being mutated.

use crate::models::{Flag, Metascreen, ScreenHandle, ScreenId};
use crate::rom::ScreenStore;

use super::Metascreens;

/// Read-only view given to tile generators.
///
/// Generators may look up sibling screens by handle and read stored tiles.
pub struct GenerateContext<'a> {
    catalog: &'a Metascreens,
    store: &'a dyn ScreenStore,
}

impl<'a> GenerateContext<'a> {
    pub(crate) fn new(catalog: &'a Metascreens, store: &'a dyn ScreenStore) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &Metascreens {
        self.catalog
    }

    pub fn screen(&self, handle: ScreenHandle) -> &Metascreen {
        self.catalog.screen(handle)
    }

    /// Current id of a sibling screen.
    pub fn id_of(&self, handle: ScreenHandle) -> ScreenId {
        self.catalog.screen(handle).id()
    }

    pub fn tiles(&self, id: ScreenId) -> Option<&[u8]> {
        self.store.screen(id)
    }

    /// Tiles stored under a sibling screen's current id.
    pub fn tiles_of(&self, handle: ScreenHandle) -> Option<&[u8]> {
        self.tiles(self.id_of(handle))
    }
}

/// Mutable view given to per-fix update hooks.
///
/// Besides the screen the hook belongs to, the hook may read any screen
/// and change screen flags, and it may write to the screen store.
pub struct FixUpdate<'a> {
    handle: ScreenHandle,
    seed: Option<u32>,
    screens: &'a mut [Metascreen],
    store: &'a mut dyn ScreenStore,
}

impl<'a> FixUpdate<'a> {
    pub(crate) fn new(
        handle: ScreenHandle,
        seed: Option<u32>,
        screens: &'a mut [Metascreen],
        store: &'a mut dyn ScreenStore,
    ) -> Self {
        Self { handle, seed, screens, store }
    }

    /// The screen whose hook is running.
    pub fn handle(&self) -> ScreenHandle {
        self.handle
    }

    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    pub fn screen(&self, handle: ScreenHandle) -> &Metascreen {
        &self.screens[handle.uid().index()]
    }

    /// Set a screen's flag. Returns `false`, changing nothing, for a handle
    /// this catalog never issued.
    pub fn set_flag(&mut self, handle: ScreenHandle, flag: Option<Flag>) -> bool {
        match self.screens.get_mut(handle.uid().index()) {
            Some(screen) => {
                screen.flag = flag;
                true
            }
            None => false,
        }
    }

    pub fn store(&mut self) -> &mut dyn ScreenStore {
        &mut *self.store
    }
}
