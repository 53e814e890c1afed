//! Screen descriptions and the records the catalog keeps for them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use super::geometry::{Exit, Feature, Flag, Placement};
use super::id::{ScreenId, Uid};
use super::tileset::{ScreenFix, TilesetName, TilesetRequirement};
use crate::registry::{FixUpdate, GenerateContext};

/// Closure producing a screen's tile bytes on demand.
pub type TileGenerator = Box<dyn FnOnce(&GenerateContext<'_>) -> Vec<u8>>;

/// Where a screen's own tile bytes come from.
#[derive(Default)]
pub enum TileSource {
    /// No tiles of its own; the screen uses whatever its id's slot holds.
    #[default]
    Missing,
    /// Tiles produced by a generator the first time they are needed.
    Generator(TileGenerator),
    /// Concrete tiles waiting to be installed into a slot.
    Materialized(Vec<u8>),
}

impl TileSource {
    pub fn generator(f: impl FnOnce(&GenerateContext<'_>) -> Vec<u8> + 'static) -> Self {
        TileSource::Generator(Box::new(f))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, TileSource::Missing)
    }

    pub fn kind(&self) -> TileSourceKind {
        match self {
            TileSource::Missing => TileSourceKind::Missing,
            TileSource::Generator(_) => TileSourceKind::Generator,
            TileSource::Materialized(_) => TileSourceKind::Materialized,
        }
    }

    /// Produce this source's bytes, running the generator if there is one.
    pub(crate) fn into_tiles(self, ctx: &GenerateContext<'_>) -> Option<Vec<u8>> {
        match self {
            TileSource::Missing => None,
            TileSource::Generator(f) => Some(f(ctx)),
            TileSource::Materialized(bytes) => Some(bytes),
        }
    }
}

impl fmt::Debug for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileSource::Missing => f.write_str("Missing"),
            TileSource::Generator(_) => f.write_str("Generator(..)"),
            TileSource::Materialized(bytes) => write!(f, "Materialized({} bytes)", bytes.len()),
        }
    }
}

/// Serializable tag for a [`TileSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileSourceKind {
    Missing,
    Generator,
    Materialized,
}

/// Per-fix hook run when its fix is registered.
///
/// Returning `false` leaves the screen's requirements untouched. The hook may
/// change sibling screens' flags through the [`FixUpdate`] it receives.
/// Hooks run again if a fix is registered twice, so callers should register
/// each fix once.
#[derive(Clone)]
pub struct ScreenUpdate {
    pub fix: ScreenFix,
    /// Registration fails with `MissingSeed` when this is set and no seed
    /// was supplied.
    pub requires_seed: bool,
    pub apply: Rc<dyn Fn(&mut FixUpdate<'_>) -> bool>,
}

impl ScreenUpdate {
    pub fn new(fix: ScreenFix, apply: impl Fn(&mut FixUpdate<'_>) -> bool + 'static) -> Self {
        Self { fix, requires_seed: false, apply: Rc::new(apply) }
    }

    pub fn seeded(fix: ScreenFix, apply: impl Fn(&mut FixUpdate<'_>) -> bool + 'static) -> Self {
        Self { fix, requires_seed: true, apply: Rc::new(apply) }
    }
}

impl fmt::Debug for ScreenUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenUpdate")
            .field("fix", &self.fix)
            .field("requires_seed", &self.requires_seed)
            .finish_non_exhaustive()
    }
}

/// Probe answering whether the neighbor at `(dy, dx)` is reachable.
pub type ReachabilityProbe<'a> = &'a dyn Fn(i32, i32) -> bool;

/// Predicate used by the map generator to choose among same-id variants.
///
/// The catalog stores and hands this out but never calls it.
#[derive(Clone)]
pub struct Matcher(Rc<dyn Fn(ReachabilityProbe<'_>) -> bool>);

impl Matcher {
    pub fn new(f: impl Fn(ReachabilityProbe<'_>) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn matches(&self, probe: ReachabilityProbe<'_>) -> bool {
        (self.0)(probe)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matcher(..)")
    }
}

/// Full description of a screen variant, as passed to
/// [`Metascreens::metascreen`](crate::registry::Metascreens::metascreen).
///
/// The plain-data part (de)serializes; the tile source, update hooks and
/// matcher are attached with the builder methods.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScreenData {
    pub id: ScreenId,
    #[serde(default)]
    pub tilesets: BTreeMap<TilesetName, TilesetRequirement>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub feature: BTreeSet<Feature>,
    /// Edge types, one char per side (top, left, bottom, right).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<String>,
    /// Connectivity string describing which edges link up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exits: Vec<Exit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<Flag>,
    #[serde(default)]
    pub placement: Placement,
    #[serde(skip)]
    pub definition: TileSource,
    #[serde(skip)]
    pub update: Vec<ScreenUpdate>,
    #[serde(skip)]
    pub matcher: Option<Matcher>,
}

impl ScreenData {
    pub fn new(id: ScreenId) -> Self {
        Self {
            id,
            tilesets: BTreeMap::new(),
            feature: BTreeSet::new(),
            edges: None,
            connect: None,
            exits: Vec::new(),
            flag: None,
            placement: Placement::Auto,
            definition: TileSource::Missing,
            update: Vec::new(),
            matcher: None,
        }
    }

    pub fn tileset(mut self, name: TilesetName, requirement: TilesetRequirement) -> Self {
        self.tilesets.insert(name, requirement);
        self
    }

    pub fn exit(mut self, exit: Exit) -> Self {
        self.exits.push(exit);
        self
    }

    pub fn feature(mut self, feature: Feature) -> Self {
        self.feature.insert(feature);
        self
    }

    pub fn definition(mut self, source: TileSource) -> Self {
        self.definition = source;
        self
    }

    pub fn update(mut self, update: ScreenUpdate) -> Self {
        self.update.push(update);
        self
    }

    pub fn matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = Some(matcher);
        self
    }
}

/// A screen variant owned by the catalog.
///
/// Everything except the id, the flag, the tile source and the per-tileset
/// requirement bookkeeping is fixed at construction.
#[derive(Debug)]
pub struct Metascreen {
    pub(crate) uid: Uid,
    pub(crate) name: String,
    pub(crate) id: ScreenId,
    pub(crate) tilesets: BTreeMap<TilesetName, TilesetRequirement>,
    /// Tilesets this screen has been added to.
    pub(crate) active: BTreeSet<TilesetName>,
    pub(crate) definition: TileSource,
    pub(crate) flag: Option<Flag>,
    pub(crate) feature: BTreeSet<Feature>,
    pub(crate) edges: Option<String>,
    pub(crate) connect: Option<String>,
    pub(crate) exits: Vec<Exit>,
    pub(crate) placement: Placement,
    pub(crate) update: Vec<ScreenUpdate>,
    pub(crate) matcher: Option<Matcher>,
}

impl Metascreen {
    pub(crate) fn new(uid: Uid, name: String, data: ScreenData) -> Self {
        Self {
            uid,
            name,
            id: data.id,
            tilesets: data.tilesets,
            active: BTreeSet::new(),
            definition: data.definition,
            flag: data.flag,
            feature: data.feature,
            edges: data.edges,
            connect: data.connect,
            exits: data.exits,
            placement: data.placement,
            update: data.update,
            matcher: data.matcher,
        }
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn tilesets(&self) -> &BTreeMap<TilesetName, TilesetRequirement> {
        &self.tilesets
    }

    /// Whether this screen is currently placeable in `tileset`.
    pub fn is_active_in(&self, tileset: TilesetName) -> bool {
        self.active.contains(&tileset)
    }

    pub fn active_tilesets(&self) -> impl Iterator<Item = TilesetName> + '_ {
        self.active.iter().copied()
    }

    pub fn definition(&self) -> &TileSource {
        &self.definition
    }

    pub fn flag(&self) -> Option<Flag> {
        self.flag
    }

    pub fn features(&self) -> &BTreeSet<Feature> {
        &self.feature
    }

    pub fn edges(&self) -> Option<&str> {
        self.edges.as_deref()
    }

    pub fn connect(&self) -> Option<&str> {
        self.connect.as_deref()
    }

    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn matcher(&self) -> Option<&Matcher> {
        self.matcher.as_ref()
    }

    pub(crate) fn update_for(&self, fix: ScreenFix) -> Option<&ScreenUpdate> {
        self.update.iter().find(|u| u.fix == fix)
    }

    /// Whether this screen lists any of `filter` among its tilesets.
    pub(crate) fn in_any_tileset(&self, filter: &[TilesetName]) -> bool {
        filter.iter().any(|t| self.tilesets.contains_key(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExitType;

    #[test]
    fn test_screen_data_from_json() {
        let data: ScreenData = serde_json::from_str(
            r#"{
                "id": 12,
                "tilesets": {"desert": {"requires": ["desert-rocks"]}, "grass": {}},
                "feature": ["bridge"],
                "edges": " n n",
                "exits": [{"type": "door", "entrance": 1, "exits": [2]}],
                "placement": "manual"
            }"#,
        )
        .unwrap();
        assert_eq!(data.id, ScreenId::Real(12));
        assert_eq!(data.tilesets.len(), 2);
        assert!(data.tilesets[&TilesetName::Grass].is_satisfied());
        assert_eq!(data.exits[0].kind, ExitType::Door);
        assert_eq!(data.placement, Placement::Manual);
        assert!(data.definition.is_missing());
    }

    #[test]
    fn test_matcher_is_forwarded_not_interpreted() {
        let matcher = Matcher::new(|reachable| reachable(0, 1) && !reachable(1, 0));
        assert!(matcher.matches(&|dy, dx| dy == 0 && dx == 1));
        assert!(!matcher.matches(&|_, _| true));
    }

    #[test]
    fn test_tile_source_kind() {
        assert_eq!(TileSource::Missing.kind(), TileSourceKind::Missing);
        assert_eq!(TileSource::Materialized(vec![1]).kind(), TileSourceKind::Materialized);
        assert_eq!(TileSource::generator(|_| vec![]).kind(), TileSourceKind::Generator);
    }
}
