//! Area-of-interest polygons and overlap-based tile selection

use crate::io::error::{Result, invalid_geometry};
use crate::spatial::region::Region;
use crate::spatial::tiles::{Tile, TileSet};
use geo::{Area, BooleanOps, BoundingRect, Intersects, MultiPolygon};

/// Arbitrary polygonal area a user wants mapped
#[derive(Debug, Clone, PartialEq)]
pub struct AreaOfInterest {
    geometry: MultiPolygon<f64>,
}

impl AreaOfInterest {
    /// Wrap a multipolygon as an area of interest
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry has no area
    pub fn new(geometry: MultiPolygon<f64>) -> Result<Self> {
        let area = geometry.unsigned_area();
        if !area.is_finite() || area <= 0.0 {
            return Err(invalid_geometry(
                &"area of interest",
                &format!("area must be positive, got {area}"),
            ));
        }
        Ok(Self { geometry })
    }

    /// Area of interest covering exactly a region
    pub fn from_region(region: &Region) -> Self {
        Self {
            geometry: MultiPolygon::new(vec![region.to_rect().to_polygon()]),
        }
    }

    /// Underlying geometry
    pub const fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Planar area in squared coordinate units
    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }

    /// Smallest region enclosing the area of interest
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry has no extent on one axis
    pub fn bounding_region(&self) -> Result<Region> {
        let rect = self.geometry.bounding_rect().ok_or_else(|| {
            invalid_geometry(&"area of interest", &"geometry has no coordinates")
        })?;
        Region::from_rect(&rect)
    }

    /// Fraction of the tile's area lying inside the area of interest
    pub fn coverage_fraction(&self, tile: &Tile) -> f64 {
        let tile_area = tile.area();
        if tile_area <= 0.0 {
            return 0.0;
        }
        let footprint = MultiPolygon::new(vec![tile.polygon()]);
        let inside = footprint.intersection(&self.geometry).unsigned_area();
        (inside / tile_area).clamp(0.0, 1.0)
    }

    /// Tiles overlapping the area of interest by at least `min_coverage`
    ///
    /// Tiles touching only along an edge or corner are never selected.
    /// Input order is preserved.
    pub fn select(&self, tiles: &TileSet, min_coverage: f64) -> TileSet {
        tiles.filtered(|tile| {
            self.geometry.intersects(&tile.polygon()) && {
                let fraction = self.coverage_fraction(tile);
                fraction > 0.0 && fraction >= min_coverage
            }
        })
    }
}
