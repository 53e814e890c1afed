//! Data models for screens: ids, tilesets, fixes and screen descriptions.

mod geometry;
mod id;
mod screen;
mod tileset;

pub use geometry::{Exit, ExitType, Feature, Flag, Placement};
pub use id::{ParseScreenIdError, ScreenHandle, ScreenId, Uid};
pub use screen::{
    Matcher, Metascreen, ReachabilityProbe, ScreenData, ScreenUpdate, TileGenerator, TileSource,
    TileSourceKind,
};
pub use tileset::{ScreenFix, TilesetName, TilesetRequirement};
