//! Identity types for screens.
//!
//! A [`ScreenId`] is the (non-unique) lookup key a screen is stored under,
//! while a [`Uid`] is the screen's true identity: its insertion order in
//! the catalog.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lookup key for a screen.
///
/// Real ids address a concrete slot in the ROM's screen table. Virtual ids
/// are a separate namespace for screens that currently have no concrete
/// slot (e.g. while they are displaced by a renumbering). The two spaces
/// never compare equal.
///
/// On the outer surfaces (config files, JSON, CLI) ids are written as plain
/// integers: `n >= 0` is `Real(n)` and `-n` is `Virtual(n - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreenId {
    Real(u16),
    Virtual(u16),
}

impl ScreenId {
    pub fn is_real(self) -> bool {
        matches!(self, ScreenId::Real(_))
    }

    pub fn is_virtual(self) -> bool {
        matches!(self, ScreenId::Virtual(_))
    }

    /// Signed integer form of this id.
    pub fn to_raw(self) -> i32 {
        match self {
            ScreenId::Real(n) => i32::from(n),
            ScreenId::Virtual(n) => -i32::from(n) - 1,
        }
    }

    /// Build an id from its signed integer form.
    ///
    /// Returns `None` if the value falls outside either namespace.
    pub fn from_raw(raw: i32) -> Option<Self> {
        if raw >= 0 {
            u16::try_from(raw).ok().map(ScreenId::Real)
        } else {
            u16::try_from(-(raw + 1)).ok().map(ScreenId::Virtual)
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenId::Real(n) => write!(f, "{:#04x}", n),
            ScreenId::Virtual(n) => write!(f, "~{}", n),
        }
    }
}

/// Error parsing a screen id from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid screen id '{0}'")]
pub struct ParseScreenIdError(pub String);

impl FromStr for ScreenId {
    type Err = ParseScreenIdError;

    /// Accepts decimal (`12`, `-1`), hex (`0x0c`) and the display form of
    /// virtual ids (`~0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseScreenIdError(s.to_string());
        let t = s.trim();
        if let Some(rest) = t.strip_prefix('~') {
            return rest.parse::<u16>().map(ScreenId::Virtual).map_err(|_| err());
        }
        let raw = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
            i32::from_str_radix(hex, 16).map_err(|_| err())?
        } else {
            t.parse::<i32>().map_err(|_| err())?
        };
        ScreenId::from_raw(raw).ok_or_else(err)
    }
}

impl Serialize for ScreenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.to_raw())
    }
}

impl<'de> Deserialize<'de> for ScreenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        i32::try_from(raw)
            .ok()
            .and_then(ScreenId::from_raw)
            .ok_or_else(|| serde::de::Error::custom(format!("screen id {} out of range", raw)))
    }
}

/// Unique identity of a screen: its insertion order into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(pub u32);

impl Uid {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Typed handle to a screen owned by a catalog.
///
/// Handles are cheap to copy and stay valid for the catalog's lifetime,
/// so screens can refer to their siblings (for example from a tile
/// generator closure) without going through the mutable id. Only a catalog
/// hands them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenHandle(Uid);

impl ScreenHandle {
    pub(crate) fn new(uid: Uid) -> Self {
        Self(uid)
    }

    pub fn uid(self) -> Uid {
        self.0
    }
}
