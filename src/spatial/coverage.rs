//! Union of existing tile rectangles for overlap queries
//!
//! Existing tiles are bulk-loaded into an R-tree once. A query only visits
//! the tiles whose envelopes meet the query rectangle, clips them to it and
//! measures their local union: the distinct clipped edges cut the query into
//! cells, a cell is covered when it lies inside at least one clipped tile,
//! and the covered area is the sum of covered cells. This is exact for
//! axis-aligned rectangles and its cost depends on how many tiles touch the
//! query, not on the size of the whole set.

use crate::spatial::tiles::TileSet;
use geo::{Coord, Rect};
use ndarray::Array2;
use rstar::{AABB, RTree, RTreeObject};

/// Existing tile footprint stored in the index
#[derive(Debug, Clone, Copy, PartialEq)]
struct Footprint(Rect<f64>);

impl RTreeObject for Footprint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.0)
    }
}

/// Spatial index over the rectangles of a tile set
#[derive(Clone)]
pub struct CoverageMap {
    tree: RTree<Footprint>,
}

impl CoverageMap {
    /// Build the union of every tile in the set
    pub fn from_tiles(tiles: &TileSet) -> Self {
        Self::from_rects(tiles.iter().map(|tile| *tile.geometry()))
    }

    /// Build the union of arbitrary axis-aligned rectangles
    ///
    /// Rectangles without area are ignored.
    pub fn from_rects(rects: impl IntoIterator<Item = Rect<f64>>) -> Self {
        let footprints: Vec<Footprint> = rects
            .into_iter()
            .filter(|rect| rect.width() > 0.0 && rect.height() > 0.0)
            .map(Footprint)
            .collect();
        Self {
            tree: RTree::bulk_load(footprints),
        }
    }

    /// Whether nothing is covered
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Number of indexed rectangles
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Area of `rect` that lies inside the union
    pub fn covered_area(&self, rect: &Rect<f64>) -> f64 {
        let area = rect.width() * rect.height();
        if area <= 0.0 {
            return 0.0;
        }

        let mut clipped = Vec::new();
        for footprint in self.tree.locate_in_envelope_intersecting(&envelope_of(rect)) {
            let Some(piece) = clip(&footprint.0, rect) else {
                continue;
            };
            // Fully inside one tile: skip the cell sum so the ratio is exactly one
            if piece == *rect {
                return area;
            }
            clipped.push(piece);
        }

        union_area(&clipped)
    }

    /// Fraction of `rect`'s own area that lies inside the union, in `[0, 1]`
    ///
    /// Degenerate rectangles report zero coverage.
    pub fn covered_fraction(&self, rect: &Rect<f64>) -> f64 {
        let area = rect.width() * rect.height();
        if area <= 0.0 {
            return 0.0;
        }
        (self.covered_area(rect) / area).clamp(0.0, 1.0)
    }
}

fn envelope_of(rect: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}

/// Part of `rect` inside `bounds`, if it has positive area
fn clip(rect: &Rect<f64>, bounds: &Rect<f64>) -> Option<Rect<f64>> {
    let min = Coord {
        x: rect.min().x.max(bounds.min().x),
        y: rect.min().y.max(bounds.min().y),
    };
    let max = Coord {
        x: rect.max().x.min(bounds.max().x),
        y: rect.max().y.min(bounds.max().y),
    };
    (max.x > min.x && max.y > min.y).then(|| Rect::new(min, max))
}

/// Exact area of the union of a few rectangles
fn union_area(rects: &[Rect<f64>]) -> f64 {
    match rects {
        [] => return 0.0,
        [only] => return only.width() * only.height(),
        _ => {}
    }

    let x_edges = sorted_edges(rects.iter().flat_map(|r| [r.min().x, r.max().x]));
    let y_edges = sorted_edges(rects.iter().flat_map(|r| [r.min().y, r.max().y]));

    let mut covered = Array2::from_elem(
        (
            x_edges.len().saturating_sub(1),
            y_edges.len().saturating_sub(1),
        ),
        false,
    );
    for rect in rects {
        let rows = edge_span(&y_edges, rect.min().y, rect.max().y);
        for i in edge_span(&x_edges, rect.min().x, rect.max().x) {
            for j in rows.clone() {
                if let Some(cell) = covered.get_mut((i, j)) {
                    *cell = true;
                }
            }
        }
    }

    covered
        .indexed_iter()
        .filter(|&(_, &cell)| cell)
        .map(|((i, j), _)| span(&x_edges, i) * span(&y_edges, j))
        .sum()
}

fn sorted_edges(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut edges: Vec<f64> = values.collect();
    edges.sort_by(f64::total_cmp);
    edges.dedup();
    edges
}

/// Cells lying between two edges that are both present in `edges`
fn edge_span(edges: &[f64], min: f64, max: f64) -> std::ops::Range<usize> {
    let start = edges.partition_point(|&edge| edge < min);
    let end = edges.partition_point(|&edge| edge < max);
    start..end
}

fn span(edges: &[f64], index: usize) -> f64 {
    match (edges.get(index), edges.get(index + 1)) {
        (Some(low), Some(high)) => high - low,
        _ => 0.0,
    }
}
