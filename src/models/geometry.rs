//! Geometry and placement metadata carried by a screen.
//!
//! The catalog never interprets these values; they are passed through
//! unchanged to the map generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notable feature of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Arena,
    Bridge,
    Cabin,
    Consolidate,
    Deadend,
    Empty,
    Fortress,
    Lake,
    Lighthouse,
    Overpass,
    Pit,
    Pyramid,
    River,
    Spikes,
    Stairs,
    Statue,
    Underpass,
    Wall,
    Whirlpool,
    Windmill,
}

/// Kind of exit a screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExitType {
    #[serde(rename = "edge:top")]
    EdgeTop,
    #[serde(rename = "edge:bottom")]
    EdgeBottom,
    #[serde(rename = "edge:left")]
    EdgeLeft,
    #[serde(rename = "edge:right")]
    EdgeRight,
    #[serde(rename = "stair:up")]
    StairUp,
    #[serde(rename = "stair:down")]
    StairDown,
    #[serde(rename = "seamless:up")]
    SeamlessUp,
    #[serde(rename = "seamless:down")]
    SeamlessDown,
    #[serde(rename = "cave")]
    Cave,
    #[serde(rename = "door")]
    Door,
    #[serde(rename = "door2")]
    Door2,
    #[serde(rename = "door3")]
    Door3,
    #[serde(rename = "fortress")]
    Fortress,
    #[serde(rename = "gate")]
    Gate,
    #[serde(rename = "swamp")]
    Swamp,
    #[serde(rename = "teleporter")]
    Teleporter,
    #[serde(rename = "windmill")]
    Windmill,
}

impl ExitType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExitType::EdgeTop => "edge:top",
            ExitType::EdgeBottom => "edge:bottom",
            ExitType::EdgeLeft => "edge:left",
            ExitType::EdgeRight => "edge:right",
            ExitType::StairUp => "stair:up",
            ExitType::StairDown => "stair:down",
            ExitType::SeamlessUp => "seamless:up",
            ExitType::SeamlessDown => "seamless:down",
            ExitType::Cave => "cave",
            ExitType::Door => "door",
            ExitType::Door2 => "door2",
            ExitType::Door3 => "door3",
            ExitType::Fortress => "fortress",
            ExitType::Gate => "gate",
            ExitType::Swamp => "swamp",
            ExitType::Teleporter => "teleporter",
            ExitType::Windmill => "windmill",
        }
    }
}

impl fmt::Display for ExitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exit of a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    #[serde(rename = "type")]
    pub kind: ExitType,
    /// Entrance position (yx packed into a word).
    pub entrance: u16,
    /// Tiles that trigger this exit.
    #[serde(default)]
    pub exits: Vec<u8>,
}

impl Exit {
    pub fn new(kind: ExitType, entrance: u16, exits: impl Into<Vec<u8>>) -> Self {
        Self { kind, entrance, exits: exits.into() }
    }
}

/// Flag behavior for a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "always")]
    Always,
    #[serde(rename = "calm")]
    Calm,
    #[serde(rename = "custom:false")]
    CustomFalse,
    #[serde(rename = "custom:true")]
    CustomTrue,
}

/// How the map generator may place a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Placed by the generator's normal search.
    #[default]
    Auto,
    /// Only placed explicitly by hand.
    Manual,
    /// Placed as a modification of an already-placed screen.
    Mod,
}
