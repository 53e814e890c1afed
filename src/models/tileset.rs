//! Tileset names, fix tokens and per-tileset requirements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named category of maps a screen may be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TilesetName {
    Grass,
    Town,
    Cave,
    DolphinCave,
    Pyramid,
    River,
    Mountain,
    MountainRiver,
    Sea,
    Lime,
    Desert,
    Swamp,
    House,
    Fortress,
    Labyrinth,
    IceCave,
    Tower,
}

impl TilesetName {
    pub const ALL: [TilesetName; 17] = [
        TilesetName::Grass,
        TilesetName::Town,
        TilesetName::Cave,
        TilesetName::DolphinCave,
        TilesetName::Pyramid,
        TilesetName::River,
        TilesetName::Mountain,
        TilesetName::MountainRiver,
        TilesetName::Sea,
        TilesetName::Lime,
        TilesetName::Desert,
        TilesetName::Swamp,
        TilesetName::House,
        TilesetName::Fortress,
        TilesetName::Labyrinth,
        TilesetName::IceCave,
        TilesetName::Tower,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TilesetName::Grass => "grass",
            TilesetName::Town => "town",
            TilesetName::Cave => "cave",
            TilesetName::DolphinCave => "dolphinCave",
            TilesetName::Pyramid => "pyramid",
            TilesetName::River => "river",
            TilesetName::Mountain => "mountain",
            TilesetName::MountainRiver => "mountainRiver",
            TilesetName::Sea => "sea",
            TilesetName::Lime => "lime",
            TilesetName::Desert => "desert",
            TilesetName::Swamp => "swamp",
            TilesetName::House => "house",
            TilesetName::Fortress => "fortress",
            TilesetName::Labyrinth => "labyrinth",
            TilesetName::IceCave => "iceCave",
            TilesetName::Tower => "tower",
        }
    }

    /// Look up a tileset by its serialized name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for TilesetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability token for a ROM patch that unlocks screen variants.
///
/// Screens gated behind a fix only become placeable in a tileset once
/// every fix that tileset lists for them has been registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenFix {
    /// Long grass tiles copied into the grass tileset.
    GrassLongGrass,
    /// Remap existing long grass references to the copied tiles.
    GrassLongGrassRemapping,
    /// Arches over sea channels.
    SeaArches,
    SeaCaveEntrance,
    SeaTrees,
    SeaMarsh,
    /// Rock formations on desert screens.
    DesertRocks,
    DesertLongGrass,
    DesertShortGrass,
    DesertMarsh,
    DesertTurningEntrance,
    /// Swamp screens with a door; picks a door variant from the seed.
    SwampDoors,
    ExtraSpikes,
    CloseCaves,
    LabyrinthParapets,
    PyramidStairs,
}

impl ScreenFix {
    pub const ALL: [ScreenFix; 16] = [
        ScreenFix::GrassLongGrass,
        ScreenFix::GrassLongGrassRemapping,
        ScreenFix::SeaArches,
        ScreenFix::SeaCaveEntrance,
        ScreenFix::SeaTrees,
        ScreenFix::SeaMarsh,
        ScreenFix::DesertRocks,
        ScreenFix::DesertLongGrass,
        ScreenFix::DesertShortGrass,
        ScreenFix::DesertMarsh,
        ScreenFix::DesertTurningEntrance,
        ScreenFix::SwampDoors,
        ScreenFix::ExtraSpikes,
        ScreenFix::CloseCaves,
        ScreenFix::LabyrinthParapets,
        ScreenFix::PyramidStairs,
    ];

    /// Name as written in config files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenFix::GrassLongGrass => "grass-long-grass",
            ScreenFix::GrassLongGrassRemapping => "grass-long-grass-remapping",
            ScreenFix::SeaArches => "sea-arches",
            ScreenFix::SeaCaveEntrance => "sea-cave-entrance",
            ScreenFix::SeaTrees => "sea-trees",
            ScreenFix::SeaMarsh => "sea-marsh",
            ScreenFix::DesertRocks => "desert-rocks",
            ScreenFix::DesertLongGrass => "desert-long-grass",
            ScreenFix::DesertShortGrass => "desert-short-grass",
            ScreenFix::DesertMarsh => "desert-marsh",
            ScreenFix::DesertTurningEntrance => "desert-turning-entrance",
            ScreenFix::SwampDoors => "swamp-doors",
            ScreenFix::ExtraSpikes => "extra-spikes",
            ScreenFix::CloseCaves => "close-caves",
            ScreenFix::LabyrinthParapets => "labyrinth-parapets",
            ScreenFix::PyramidStairs => "pyramid-stairs",
        }
    }
}

impl fmt::Display for ScreenFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requirements a screen has on one tileset.
///
/// An empty `requires` list means the screen is compatible with the tileset
/// right away; otherwise it becomes compatible once every listed fix is
/// registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetRequirement {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<ScreenFix>,
}

impl TilesetRequirement {
    /// Compatible without any fix.
    pub fn eager() -> Self {
        Self::default()
    }

    /// Compatible once all `fixes` are registered.
    pub fn requires(fixes: impl IntoIterator<Item = ScreenFix>) -> Self {
        Self { requires: fixes.into_iter().collect() }
    }

    pub fn is_satisfied(&self) -> bool {
        self.requires.is_empty()
    }
}
