//! Overlap-aware grid tiling
//!
//! Candidate squares are laid out on a regular lattice over the region and
//! named in enumeration order. Candidates already mostly covered by an
//! existing tile set are skipped, so repeated runs over the same area only
//! ever append tiles for ground that is not yet mapped.
//!
//! Overlap is measured in planar coordinate units. With geographic input
//! that is square degrees, which over-weights high latitudes; the threshold
//! is a fraction of each candidate's own area, so regional grids are only
//! mildly affected.

use crate::algorithm::numbering::TileCounter;
use crate::io::configuration::{DEFAULT_OVERLAP_THRESHOLD, MAX_CANDIDATES};
use crate::io::error::{Result, invalid_parameter};
use crate::math::stepping::{axis_origins, origin_count};
use crate::spatial::coverage::CoverageMap;
use crate::spatial::region::{Region, Step};
use crate::spatial::tiles::{Tile, TileSet};
use geo::{Coord, Rect};

/// Tiling parameters shared by every call on a tiler
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilingConfig {
    /// Side length of each square tile
    pub tile_size: f64,
    /// Spacing between consecutive tile origins
    pub step: Step,
    /// Covered fraction at or above which a candidate is discarded
    pub overlap_threshold: f64,
}

impl TilingConfig {
    /// Non-overlapping tiles of the given size and the default threshold
    pub const fn new(tile_size: f64) -> Self {
        Self {
            tile_size,
            step: Step::uniform(tile_size),
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }

    /// Replace the origin spacing
    #[must_use]
    pub const fn with_step(mut self, step: Step) -> Self {
        self.step = step;
        self
    }

    /// Replace the overlap threshold
    #[must_use]
    pub const fn with_overlap_threshold(mut self, overlap_threshold: f64) -> Self {
        self.overlap_threshold = overlap_threshold;
        self
    }

    /// Check every parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size or a step component is not positive
    /// and finite, or the threshold lies outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be positive and finite",
            ));
        }
        self.step.validate()?;
        if !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err(invalid_parameter(
                "overlap_threshold",
                &self.overlap_threshold,
                &"must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Receives progress while candidates are evaluated
pub trait TilingObserver {
    /// Called once before enumeration with the total candidate count
    fn started(&mut self, _total: usize) {}

    /// Called after each candidate is accepted or discarded
    fn candidate_evaluated(&mut self, _evaluated: usize, _accepted: Option<&Tile>) {}

    /// Called once after the last candidate
    fn finished(&mut self, _outcome: &TilingOutcome) {}
}

/// Observer that ignores all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl TilingObserver for Unobserved {}

/// Result of one tiling call
#[derive(Debug, Clone, PartialEq)]
pub struct TilingOutcome {
    /// Newly accepted tiles only, in enumeration order
    pub tiles: TileSet,
    /// Counter positioned after the last issued name
    pub counter: TileCounter,
    /// Number of candidates enumerated
    pub candidates: usize,
    /// Number of candidates discarded as already covered
    pub discarded: usize,
}

/// Lays out uniquely named square tiles over a region
#[derive(Debug, Clone, Copy)]
pub struct GridTiler {
    config: TilingConfig,
}

impl GridTiler {
    /// Create a tiler after validating its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is invalid
    pub fn new(config: TilingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Tiling parameters in use
    pub const fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// Number of candidates the region produces, before overlap filtering
    ///
    /// # Errors
    ///
    /// Returns an error if the steps cannot advance across the region
    pub fn candidate_count(&self, region: &Region) -> Result<usize> {
        let columns = origin_count(region.min_x(), region.max_x(), self.config.step.x)?;
        let rows = origin_count(region.min_y(), region.max_y(), self.config.step.y)?;
        columns.checked_mul(rows).ok_or_else(|| {
            invalid_parameter(
                "step",
                &self.config.step,
                &format!("{columns} x {rows} candidates overflow"),
            )
        })
    }

    /// Tile a region, continuing the numbering of `existing`
    ///
    /// Only new tiles are returned; merging them into `existing` is left to
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the region produces too many candidates or the
    /// numbering space is exhausted
    pub fn tile(&self, region: &Region, existing: Option<&TileSet>) -> Result<TilingOutcome> {
        self.tile_observed(region, existing, &mut Unobserved)
    }

    /// Tile a region, reporting progress to an observer
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`GridTiler::tile`]
    pub fn tile_observed(
        &self,
        region: &Region,
        existing: Option<&TileSet>,
        observer: &mut impl TilingObserver,
    ) -> Result<TilingOutcome> {
        let counter = TileCounter::after(existing)?;
        let coverage = existing
            .filter(|tiles| !tiles.is_empty())
            .map(CoverageMap::from_tiles);

        if let Some(map) = &coverage {
            tracing::debug!(
                existing = existing.map_or(0, TileSet::len),
                indexed = map.len(),
                "Indexed existing tiles"
            );
        }

        self.tile_continuing(region, coverage.as_ref(), counter, observer)
    }

    /// Tile a region against a prebuilt coverage map with an explicit counter
    ///
    /// The returned outcome carries the advanced counter, which can be fed
    /// into a following call to keep names unique across calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the region produces too many candidates or the
    /// numbering space is exhausted
    pub fn tile_continuing(
        &self,
        region: &Region,
        coverage: Option<&CoverageMap>,
        mut counter: TileCounter,
        observer: &mut impl TilingObserver,
    ) -> Result<TilingOutcome> {
        let total = self.candidate_count(region)?;
        if total > MAX_CANDIDATES {
            return Err(invalid_parameter(
                "step",
                &self.config.step,
                &format!("region needs {total} candidates, limit is {MAX_CANDIDATES}"),
            ));
        }

        let xs = axis_origins(region.min_x(), region.max_x(), self.config.step.x)?;
        let ys = axis_origins(region.min_y(), region.max_y(), self.config.step.y)?;
        let coverage = coverage.filter(|map| !map.is_empty());
        let size = self.config.tile_size;

        observer.started(total);

        let mut accepted = Vec::new();
        let mut evaluated = 0;
        let mut discarded = 0;

        // x-major: the outer loop walks columns so numbering is reproducible
        for &x in &xs {
            for &y in &ys {
                evaluated += 1;
                let footprint = Rect::new(
                    Coord { x, y },
                    Coord {
                        x: x + size,
                        y: y + size,
                    },
                );

                let covered = coverage.is_some_and(|map| {
                    map.covered_fraction(&footprint) >= self.config.overlap_threshold
                });

                if covered {
                    discarded += 1;
                    observer.candidate_evaluated(evaluated, None);
                    continue;
                }

                let tile = Tile::new(counter.issue()?, footprint);
                observer.candidate_evaluated(evaluated, Some(&tile));
                accepted.push(tile);
            }
        }

        let outcome = TilingOutcome {
            tiles: TileSet::try_from_tiles(accepted)?,
            counter,
            candidates: evaluated,
            discarded,
        };

        tracing::debug!(
            region = %region,
            candidates = outcome.candidates,
            accepted = outcome.tiles.len(),
            discarded = outcome.discarded,
            "Tiled region"
        );

        observer.finished(&outcome);
        Ok(outcome)
    }
}
