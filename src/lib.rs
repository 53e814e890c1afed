//! Metascreens - catalog of reusable tile-layout screens for map generation
//!
//! This library provides functionality to:
//! - Build a catalog of screen variants that share non-unique ids
//! - Unlock variants gated behind ROM patches ("fixes")
//! - Renumber screens while keeping the ROM's screen store and locations in sync
//! - Load catalogs and patch plans from JSON tables and `metascreens.toml`

pub mod cli;
pub mod config;
pub mod models;
pub mod plan;
pub mod registry;
pub mod rom;
pub mod table;
