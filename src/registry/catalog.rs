//! The screen catalog: construction and lookup.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error};

use crate::config::CatalogConfig;
use crate::models::{
    Metascreen, ScreenData, ScreenFix, ScreenHandle, ScreenId, TilesetName, Uid,
};
use crate::rom::Tilesets;

use super::error::CatalogError;

/// Catalog of every screen variant.
///
/// Screens live in an append-only arena indexed by [`Uid`]. Two indices
/// point into it: id to screens (many screens may share an id) and fix to
/// the screens gated behind that fix. A third list keeps the debug name of
/// each screen in construction order.
#[derive(Debug)]
pub struct Metascreens {
    pub(crate) config: CatalogConfig,
    pub(crate) screens: Vec<Metascreen>,
    pub(crate) names: Vec<(String, ScreenHandle)>,
    pub(crate) by_id: BTreeMap<ScreenId, Vec<Uid>>,
    pub(crate) by_fix: BTreeMap<ScreenFix, Vec<Uid>>,
    pub(crate) fixed: BTreeSet<ScreenFix>,
    poisoned: Option<String>,
}

impl Metascreens {
    /// Create an empty catalog.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            screens: Vec::new(),
            names: Vec::new(),
            by_id: BTreeMap::new(),
            by_fix: BTreeMap::new(),
            fixed: BTreeSet::new(),
            poisoned: None,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Add a screen to the catalog.
    ///
    /// The screen gets the next uid and is indexed under its id. For each
    /// tileset it lists, it is either added to the tileset right away (no
    /// requirements) or indexed under every fix the tileset requires.
    pub fn metascreen<T: Tilesets + ?Sized>(
        &mut self,
        name: impl Into<String>,
        data: ScreenData,
        tilesets: &mut T,
    ) -> Result<ScreenHandle, CatalogError> {
        self.check_usable()?;

        let uid = Uid(self.screens.len() as u32);
        let handle = ScreenHandle::new(uid);
        let name = name.into();
        let mut screen = Metascreen::new(uid, name.clone(), data);

        self.by_id.entry(screen.id).or_default().push(uid);

        let mut eager = Vec::new();
        for (&tileset, requirement) in &screen.tilesets {
            if requirement.is_satisfied() {
                eager.push(tileset);
            } else {
                for &fix in &requirement.requires {
                    let gated = self.by_fix.entry(fix).or_default();
                    if !gated.contains(&uid) {
                        gated.push(uid);
                    }
                }
            }
        }
        for tileset in eager {
            activate(&mut screen, handle, tileset, tilesets);
        }

        if self.config.debug {
            debug!("metascreen {} {} id={}", uid, name, screen.id);
        }
        self.screens.push(screen);
        self.names.push((name, handle));
        Ok(handle)
    }

    /// Screens currently stored under `id`, in insertion order.
    ///
    /// With a tileset, only screens currently placeable in it are returned.
    /// The result is a fresh vector; changing it does not touch the catalog.
    pub fn get_by_id(&self, id: ScreenId, tileset: Option<TilesetName>) -> Vec<ScreenHandle> {
        let Some(bucket) = self.by_id.get(&id) else {
            return Vec::new();
        };
        bucket
            .iter()
            .filter(|uid| tileset.map_or(true, |t| self.screens[uid.index()].is_active_in(t)))
            .map(|&uid| ScreenHandle::new(uid))
            .collect()
    }

    /// Whether `fix` has been registered.
    pub fn is_fixed(&self, fix: ScreenFix) -> bool {
        self.fixed.contains(&fix)
    }

    pub fn fixed(&self) -> impl Iterator<Item = ScreenFix> + '_ {
        self.fixed.iter().copied()
    }

    /// Screens gated behind `fix` (whether or not it is registered yet).
    pub fn gated_by(&self, fix: ScreenFix) -> Vec<ScreenHandle> {
        self.by_fix
            .get(&fix)
            .map(|uids| uids.iter().map(|&uid| ScreenHandle::new(uid)).collect())
            .unwrap_or_default()
    }

    /// The screen behind a handle issued by this catalog.
    ///
    /// Panics on a handle from a different, larger catalog; use [`get`]
    /// when the handle's origin is unknown.
    ///
    /// [`get`]: Metascreens::get
    pub fn screen(&self, handle: ScreenHandle) -> &Metascreen {
        &self.screens[handle.uid().index()]
    }

    pub fn get(&self, handle: ScreenHandle) -> Option<&Metascreen> {
        self.screens.get(handle.uid().index())
    }

    /// Look up a screen by the name it was constructed with.
    pub fn by_name(&self, name: &str) -> Option<ScreenHandle> {
        self.names.iter().find(|(n, _)| n == name).map(|&(_, handle)| handle)
    }

    /// Screen names with their handles, in construction order.
    pub fn names(&self) -> impl Iterator<Item = (&str, ScreenHandle)> + '_ {
        self.names.iter().map(|(name, handle)| (name.as_str(), *handle))
    }

    /// All ids that currently have at least one screen.
    pub fn ids(&self) -> impl Iterator<Item = ScreenId> + '_ {
        self.by_id.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScreenHandle, &Metascreen)> + '_ {
        self.screens.iter().map(|s| (ScreenHandle::new(s.uid), s))
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Whether an earlier renumber left the catalog inconsistent.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    pub(crate) fn check_usable(&self) -> Result<(), CatalogError> {
        match &self.poisoned {
            Some(reason) => Err(CatalogError::InconsistentState(reason.clone())),
            None => Ok(()),
        }
    }

    /// Record an unrecoverable failure and return the error for it.
    pub(crate) fn poison(&mut self, reason: String) -> CatalogError {
        error!("catalog poisoned: {}", reason);
        self.poisoned = Some(reason.clone());
        CatalogError::InconsistentState(reason)
    }

    /// Comma-separated names of the screens under `id`.
    pub(crate) fn names_for(&self, id: ScreenId) -> String {
        self.by_id
            .get(&id)
            .map(|uids| {
                uids.iter()
                    .map(|uid| self.screens[uid.index()].name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }
}

/// Make `screen` placeable in `tileset`, notifying the tileset once.
pub(crate) fn activate<T: Tilesets + ?Sized>(
    screen: &mut Metascreen,
    handle: ScreenHandle,
    tileset: TilesetName,
    tilesets: &mut T,
) {
    if screen.active.insert(tileset) {
        tilesets.add_screen(tileset, handle);
    }
}
