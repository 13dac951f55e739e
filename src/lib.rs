//! Overlap-aware sampling grids for flood-mapping workflows
//!
//! Regions are covered with uniquely named square tiles (`GRID00000`,
//! `GRID00001`, ...). Extending an existing grid continues its numbering and
//! skips candidates that existing tiles already cover, so every artefact
//! filed under a tile name keeps its meaning across runs.

#![forbid(unsafe_code)]

/// Tile numbering and the grid tiling algorithm
pub mod algorithm;
/// Command-line handling, persistence, logging and error types
pub mod io;
/// Numeric helpers for axis stepping
pub mod math;
/// Regions, tiles, tile sets, coverage and areas of interest
pub mod spatial;

pub use algorithm::{GridTiler, TileCounter, TilingConfig, TilingOutcome};
pub use io::error::{GridError, Result};
pub use spatial::{AreaOfInterest, Region, Step, Tile, TileName, TileSet};
