//! Spatial data structures for sampling grids
//!
//! This module contains spatial-related functionality including:
//! - Regions and origin spacing
//! - Named tiles and tile sets
//! - Coverage unions for overlap queries
//! - Area-of-interest selection

/// Area-of-interest polygons and tile selection
pub mod aoi;
/// Union of existing tiles for overlap queries
pub mod coverage;
/// Bounding regions and step spacing
pub mod region;
/// Tile names, tiles and ordered tile sets
pub mod tiles;

pub use aoi::AreaOfInterest;
pub use coverage::CoverageMap;
pub use region::{Region, Step};
pub use tiles::{Tile, TileName, TileSet};
