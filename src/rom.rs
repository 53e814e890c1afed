//! Interfaces to the ROM the catalog reads from and writes to.
//!
//! The catalog never owns ROM state. It talks to three collaborators:
//! - [`Tilesets`]: receives screens as they become placeable
//! - [`ScreenStore`]: id-keyed tile bytes, touched only by renumbering
//! - [`LocationRegistry`]: repoints map references after a renumber
//!
//! [`MemoryRom`] implements all three in memory.

use std::collections::{BTreeMap, HashMap};

use crate::models::{ScreenHandle, ScreenId, TilesetName};

/// Sink for screens that become placeable in a tileset.
pub trait Tilesets {
    /// Called at most once per (screen, tileset).
    fn add_screen(&mut self, tileset: TilesetName, screen: ScreenHandle);
}

/// Id-keyed tile byte storage.
pub trait ScreenStore {
    /// Current tile bytes stored for `id`.
    fn screen(&self, id: ScreenId) -> Option<&[u8]>;

    /// Install `tiles` as the (used) entry for `id`, replacing any entry.
    fn set_screen(&mut self, id: ScreenId, tiles: Vec<u8>);

    /// Mark the entry for `id` unused, keeping its bytes.
    fn mark_unused(&mut self, id: ScreenId);

    /// Remove the entry for `id` entirely.
    fn delete_screen(&mut self, id: ScreenId);

    /// Copy of the bytes stored for `id`.
    fn clone_screen(&self, id: ScreenId) -> Option<Vec<u8>> {
        self.screen(id).map(<[u8]>::to_vec)
    }
}

/// Maps that reference screens by id.
pub trait LocationRegistry {
    fn renumber_screen(&mut self, old: ScreenId, new: ScreenId);
}

/// Everything a full catalog lifecycle touches.
pub trait Rom: Tilesets + ScreenStore + LocationRegistry {}

impl<T: Tilesets + ScreenStore + LocationRegistry> Rom for T {}

/// One stored screen slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredScreen {
    pub tiles: Vec<u8>,
    pub used: bool,
}

/// A map location: a grid of screen ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub screens: Vec<Vec<ScreenId>>,
}

/// In-memory implementation of every ROM collaborator.
#[derive(Debug, Clone, Default)]
pub struct MemoryRom {
    tilesets: HashMap<TilesetName, Vec<ScreenHandle>>,
    screens: BTreeMap<ScreenId, StoredScreen>,
    locations: Vec<Location>,
}

impl MemoryRom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location whose grid references screen ids.
    pub fn add_location(&mut self, name: impl Into<String>, screens: Vec<Vec<ScreenId>>) {
        self.locations.push(Location { name: name.into(), screens });
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Screens added to `tileset`, in the order they were added.
    pub fn tileset(&self, tileset: TilesetName) -> &[ScreenHandle] {
        self.tilesets.get(&tileset).map(Vec::as_slice).unwrap_or(&[])
    }

    /// How many times `screen` was added to `tileset`.
    pub fn add_count(&self, tileset: TilesetName, screen: ScreenHandle) -> usize {
        self.tileset(tileset).iter().filter(|&&s| s == screen).count()
    }

    pub fn stored(&self, id: ScreenId) -> Option<&StoredScreen> {
        self.screens.get(&id)
    }

    pub fn stored_screens(&self) -> &BTreeMap<ScreenId, StoredScreen> {
        &self.screens
    }
}

impl Tilesets for MemoryRom {
    fn add_screen(&mut self, tileset: TilesetName, screen: ScreenHandle) {
        self.tilesets.entry(tileset).or_default().push(screen);
    }
}

impl ScreenStore for MemoryRom {
    fn screen(&self, id: ScreenId) -> Option<&[u8]> {
        self.screens.get(&id).map(|s| s.tiles.as_slice())
    }

    fn set_screen(&mut self, id: ScreenId, tiles: Vec<u8>) {
        self.screens.insert(id, StoredScreen { tiles, used: true });
    }

    fn mark_unused(&mut self, id: ScreenId) {
        if let Some(stored) = self.screens.get_mut(&id) {
            stored.used = false;
        }
    }

    fn delete_screen(&mut self, id: ScreenId) {
        self.screens.remove(&id);
    }
}

impl LocationRegistry for MemoryRom {
    fn renumber_screen(&mut self, old: ScreenId, new: ScreenId) {
        for location in &mut self.locations {
            for cell in location.screens.iter_mut().flatten() {
                if *cell == old {
                    *cell = new;
                }
            }
        }
    }
}
