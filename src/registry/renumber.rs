//! Renumbering: moving screens from one id to another.
//!
//! A renumber runs through these steps:
//!
//! 1. Validate: `old == new` is a no-op; an occupied `new` id or an `old` id
//!    without stored tiles is rejected. Nothing has changed yet.
//! 2. Relocate: each screen under `old` (that passes the tileset filter)
//!    gives up its own tiles, if it has any, and moves to `new`.
//! 3. Back up: the stored tiles for `old` are read. When a real id is moved
//!    into the virtual namespace, those tiles are kept on the first moved
//!    screen so they can be restored later.
//! 4. Clone: the tiles are copied to `new`; `old` is marked unused (real) or
//!    deleted (virtual).
//! 5. Finalize: when a virtual id is promoted to a real one, the moved
//!    screen's own tiles replace the plain copy. Locations are repointed.
//!
//! A failure after step 2 has begun poisons the catalog.

use tracing::debug;

use crate::models::{ScreenId, TileSource, TilesetName, Uid};
use crate::rom::Rom;

use super::context::GenerateContext;
use super::error::CatalogError;
use super::Metascreens;

impl Metascreens {
    /// Move the screens under `old` to `new`.
    ///
    /// With `tilesets`, only screens listing at least one of those tilesets
    /// move; the rest stay under `old`. A virtual `old` slot is deleted even
    /// then, so screens left behind under it cannot be renumbered again
    /// (`UnknownScreen`) until new tiles are stored for that id.
    pub fn renumber<R: Rom>(
        &mut self,
        old: ScreenId,
        new: ScreenId,
        tilesets: Option<&[TilesetName]>,
        rom: &mut R,
    ) -> Result<(), CatalogError> {
        self.check_usable()?;
        if old == new {
            return Ok(());
        }
        if self.by_id.get(&new).map_or(false, |bucket| !bucket.is_empty()) {
            return Err(CatalogError::DuplicateId { id: new, names: self.names_for(new) });
        }
        if rom.screen(old).is_none() {
            return Err(CatalogError::UnknownScreen(old));
        }

        let (moved, captured) = self.relocate(old, new, tilesets, rom);
        if self.config.debug {
            debug!("renumber {} -> {}: moved {} screen(s)", old, new, moved.len());
        }

        let Some(original) = rom.clone_screen(old) else {
            return Err(self.poison(format!("stored screen {} vanished during renumber", old)));
        };
        if old.is_real() && new.is_virtual() {
            if let Some(first) = moved.first() {
                self.screens[first.index()].definition = TileSource::Materialized(original.clone());
            }
        }

        rom.set_screen(new, original);
        if old.is_virtual() {
            rom.delete_screen(old);
        } else {
            rom.mark_unused(old);
        }

        if old.is_virtual() && new.is_real() {
            if let Some(tiles) = captured {
                if self.config.debug {
                    debug!("renumber {} -> {}: installing generated tiles", old, new);
                }
                rom.set_screen(new, tiles);
            }
        }
        rom.renumber_screen(old, new);
        Ok(())
    }

    /// Move qualifying screens from `old` to `new` in the id index.
    ///
    /// Returns the moved uids and the tiles produced by the last moved screen
    /// that had a tile source of its own.
    fn relocate<R: Rom>(
        &mut self,
        old: ScreenId,
        new: ScreenId,
        tilesets: Option<&[TilesetName]>,
        rom: &R,
    ) -> (Vec<Uid>, Option<Vec<u8>>) {
        let bucket = self.by_id.remove(&old).unwrap_or_default();
        let (moved, kept): (Vec<Uid>, Vec<Uid>) = bucket
            .into_iter()
            .partition(|uid| tilesets.map_or(true, |f| self.screens[uid.index()].in_any_tileset(f)));
        if !kept.is_empty() {
            self.by_id.insert(old, kept);
        }

        let mut captured = None;
        for &uid in &moved {
            let source = std::mem::take(&mut self.screens[uid.index()].definition);
            if !source.is_missing() {
                let ctx = GenerateContext::new(self, rom);
                captured = source.into_tiles(&ctx);
            }
            self.screens[uid.index()].id = new;
        }
        if !moved.is_empty() {
            self.by_id.insert(new, moved.clone());
        }
        (moved, captured)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CatalogConfig;
    use crate::models::{
        ScreenData, ScreenHandle, ScreenId, TileSource, TileSourceKind, TilesetName,
        TilesetRequirement,
    };
    use crate::registry::{CatalogError, Metascreens};
    use crate::rom::{LocationRegistry, MemoryRom, ScreenStore, Tilesets};

    const A: ScreenId = ScreenId::Real(0x0c);
    const B: ScreenId = ScreenId::Real(0x0d);
    const V: ScreenId = ScreenId::Virtual(0);

    fn setup() -> (Metascreens, MemoryRom) {
        let mut rom = MemoryRom::new();
        rom.set_screen(A, vec![1, 1, 1]);
        rom.add_location("Desert", vec![vec![A, B]]);
        (Metascreens::new(CatalogConfig::default()), rom)
    }

    #[test]
    fn test_same_id_is_noop() {
        let (mut cat, mut rom) = setup();
        cat.metascreen("a", ScreenData::new(A), &mut rom).unwrap();
        let before = cat.snapshot();
        let store_before = rom.stored_screens().clone();
        cat.renumber(A, A, None, &mut rom).unwrap();
        assert_eq!(cat.snapshot(), before);
        assert_eq!(rom.stored_screens(), &store_before);
    }

    #[test]
    fn test_occupied_target_rejected() {
        let (mut cat, mut rom) = setup();
        cat.metascreen("a", ScreenData::new(A), &mut rom).unwrap();
        cat.metascreen("b1", ScreenData::new(B), &mut rom).unwrap();
        cat.metascreen("b2", ScreenData::new(B), &mut rom).unwrap();
        let before = cat.snapshot();

        let err = cat.renumber(A, B, None, &mut rom).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId { id: B, names: "b1, b2".to_string() });
        assert_eq!(err.to_string(), "ID already used: 0x0d: b1, b2");
        assert_eq!(cat.snapshot(), before);
        assert!(!cat.is_poisoned());
    }

    #[test]
    fn test_unknown_source_rejected() {
        let (mut cat, mut rom) = setup();
        cat.metascreen("b", ScreenData::new(B), &mut rom).unwrap();
        let err = cat.renumber(B, V, None, &mut rom).unwrap_err();
        assert_eq!(err, CatalogError::UnknownScreen(B));
        assert_eq!(cat.get_by_id(B, None).len(), 1);
    }

    #[test]
    fn test_move_real_to_real() {
        let (mut cat, mut rom) = setup();
        let a = cat.metascreen("a", ScreenData::new(A), &mut rom).unwrap();
        cat.renumber(A, B, None, &mut rom).unwrap();

        assert!(cat.get_by_id(A, None).is_empty());
        assert_eq!(cat.get_by_id(B, None), vec![a]);
        assert_eq!(cat.screen(a).id(), B);
        assert_eq!(rom.screen(B), Some(&[1u8, 1, 1][..]));
        let old = rom.stored(A).unwrap();
        assert!(!old.used);
        assert_eq!(old.tiles, vec![1, 1, 1]);
        assert_eq!(rom.locations()[0].screens, vec![vec![B, B]]);
    }

    #[test]
    fn test_real_to_virtual_keeps_restore_tiles() {
        let (mut cat, mut rom) = setup();
        let a = cat.metascreen("a", ScreenData::new(A), &mut rom).unwrap();
        cat.renumber(A, V, None, &mut rom).unwrap();

        assert_eq!(cat.screen(a).id(), V);
        assert_eq!(cat.screen(a).definition().kind(), TileSourceKind::Materialized);
        assert_eq!(rom.screen(V), Some(&[1u8, 1, 1][..]));
        assert!(rom.stored(A).is_some());
    }

    #[test]
    fn test_virtual_to_real_promotes_generated_tiles() {
        let (mut cat, mut rom) = setup();
        rom.set_screen(V, vec![0, 0]);
        let v = cat
            .metascreen(
                "virtual",
                ScreenData::new(V).definition(TileSource::generator(|_| vec![7, 7])),
                &mut rom,
            )
            .unwrap();
        cat.renumber(V, B, None, &mut rom).unwrap();

        assert_eq!(cat.screen(v).id(), B);
        assert!(cat.screen(v).definition().is_missing());
        assert_eq!(rom.screen(B), Some(&[7u8, 7][..]));
        assert!(rom.stored(V).is_none());
    }

    #[test]
    fn test_tileset_filter_leaves_others_behind() {
        let (mut cat, mut rom) = setup();
        let desert = cat
            .metascreen(
                "desert",
                ScreenData::new(A).tileset(TilesetName::Desert, TilesetRequirement::eager()),
                &mut rom,
            )
            .unwrap();
        let grass = cat
            .metascreen(
                "grass",
                ScreenData::new(A).tileset(TilesetName::Grass, TilesetRequirement::eager()),
                &mut rom,
            )
            .unwrap();

        cat.renumber(A, B, Some(&[TilesetName::Desert]), &mut rom).unwrap();
        assert_eq!(cat.get_by_id(A, None), vec![grass]);
        assert_eq!(cat.get_by_id(B, None), vec![desert]);
    }

    #[test]
    fn test_filtered_virtual_move_strands_remaining_screens() {
        let (mut cat, mut rom) = setup();
        rom.set_screen(V, vec![3]);
        cat.metascreen(
            "desert",
            ScreenData::new(V).tileset(TilesetName::Desert, TilesetRequirement::eager()),
            &mut rom,
        )
        .unwrap();
        let grass = cat
            .metascreen(
                "grass",
                ScreenData::new(V).tileset(TilesetName::Grass, TilesetRequirement::eager()),
                &mut rom,
            )
            .unwrap();

        cat.renumber(V, B, Some(&[TilesetName::Desert]), &mut rom).unwrap();
        assert_eq!(cat.get_by_id(V, None), vec![grass]);
        assert!(rom.stored(V).is_none());

        let err = cat.renumber(V, ScreenId::Real(0x20), None, &mut rom).unwrap_err();
        assert_eq!(err, CatalogError::UnknownScreen(V));
        assert!(!cat.is_poisoned());

        rom.set_screen(V, vec![4]);
        cat.renumber(V, ScreenId::Real(0x20), None, &mut rom).unwrap();
        assert_eq!(cat.screen(grass).id(), ScreenId::Real(0x20));
    }

    #[test]
    fn test_generator_sees_sibling_ids() {
        let (mut cat, mut rom) = setup();
        rom.set_screen(B, vec![5, 6]);
        let sibling = cat.metascreen("sibling", ScreenData::new(B), &mut rom).unwrap();
        rom.set_screen(V, vec![]);
        cat.metascreen(
            "copy",
            ScreenData::new(V).definition(TileSource::generator(move |ctx| {
                ctx.tiles_of(sibling).map(<[u8]>::to_vec).unwrap_or_default()
            })),
            &mut rom,
        )
        .unwrap();

        cat.renumber(V, ScreenId::Real(0x20), None, &mut rom).unwrap();
        assert_eq!(rom.screen(ScreenId::Real(0x20)), Some(&[5u8, 6][..]));
    }

    #[test]
    fn test_round_trip_restores_ids() {
        let (mut cat, mut rom) = setup();
        let a = cat.metascreen("a", ScreenData::new(A), &mut rom).unwrap();
        cat.renumber(A, V, None, &mut rom).unwrap();
        cat.renumber(V, A, None, &mut rom).unwrap();

        assert_eq!(cat.screen(a).id(), A);
        assert_eq!(cat.get_by_id(A, None), vec![a]);
        assert!(cat.get_by_id(V, None).is_empty());
        // The restore tiles were consumed on the way back.
        assert!(cat.screen(a).definition().is_missing());
        assert_eq!(rom.screen(A), Some(&[1u8, 1, 1][..]));
        assert!(rom.stored(A).unwrap().used);
    }

    /// Store that reports an entry but cannot produce a copy of it.
    #[derive(Default)]
    struct LossyRom {
        inner: MemoryRom,
    }

    impl Tilesets for LossyRom {
        fn add_screen(&mut self, tileset: TilesetName, screen: ScreenHandle) {
            self.inner.add_screen(tileset, screen);
        }
    }

    impl ScreenStore for LossyRom {
        fn screen(&self, id: ScreenId) -> Option<&[u8]> {
            self.inner.screen(id)
        }
        fn set_screen(&mut self, id: ScreenId, tiles: Vec<u8>) {
            self.inner.set_screen(id, tiles);
        }
        fn mark_unused(&mut self, id: ScreenId) {
            self.inner.mark_unused(id);
        }
        fn delete_screen(&mut self, id: ScreenId) {
            self.inner.delete_screen(id);
        }
        fn clone_screen(&self, _id: ScreenId) -> Option<Vec<u8>> {
            None
        }
    }

    impl LocationRegistry for LossyRom {
        fn renumber_screen(&mut self, old: ScreenId, new: ScreenId) {
            self.inner.renumber_screen(old, new);
        }
    }

    #[test]
    fn test_late_failure_poisons_catalog() {
        let mut rom = LossyRom::default();
        rom.set_screen(A, vec![1]);
        let mut cat = Metascreens::new(CatalogConfig::default());
        cat.metascreen("a", ScreenData::new(A), &mut rom).unwrap();

        let err = cat.renumber(A, B, None, &mut rom).unwrap_err();
        assert!(matches!(err, CatalogError::InconsistentState(_)));
        assert!(!err.is_recoverable());
        assert!(cat.is_poisoned());

        let again = cat.renumber(B, A, None, &mut rom).unwrap_err();
        assert!(matches!(again, CatalogError::InconsistentState(_)));
        assert!(cat.metascreen("late", ScreenData::new(V), &mut rom).is_err());
    }
}
