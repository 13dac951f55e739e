//! Named sampling tiles and ordered tile sets
//!
//! Tile names are the stable identifiers every downstream artefact is filed
//! under, so a set never holds two tiles with the same name and tiles are
//! never renamed once issued.

use crate::io::configuration::{TILE_NAME_DIGITS, TILE_NAME_PREFIX};
use crate::io::error::{GridError, Result};
use geo::{Coord, Polygon, Rect};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Numeric identity of a tile, displayed as `GRID00042`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileName(u32);

impl TileName {
    /// Name for the given numeric suffix
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Numeric suffix
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{TILE_NAME_PREFIX}{:0width$}",
            self.0,
            width = TILE_NAME_DIGITS
        )
    }
}

impl FromStr for TileName {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GridError::InvalidTileName {
            name: s.to_string(),
        };

        let digits = s.strip_prefix(TILE_NAME_PREFIX).ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Only the form `Display` produces, so distinct inputs stay distinct names
        let canonical = digits.len() == TILE_NAME_DIGITS
            || (digits.len() > TILE_NAME_DIGITS && !digits.starts_with('0'));
        if !canonical {
            return Err(invalid());
        }

        digits.parse::<u32>().map(Self).map_err(|_parse_error| invalid())
    }
}

/// A named square sampling tile
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    name: TileName,
    geometry: Rect<f64>,
}

impl Tile {
    /// Create a tile from a name and rectangle
    pub const fn new(name: TileName, geometry: Rect<f64>) -> Self {
        Self { name, geometry }
    }

    /// Create a square tile with its lower-left corner at `(x, y)`
    pub fn square(name: TileName, x: f64, y: f64, size: f64) -> Self {
        let geometry = Rect::new(
            Coord { x, y },
            Coord {
                x: x + size,
                y: y + size,
            },
        );
        Self { name, geometry }
    }

    /// Tile name
    pub const fn name(&self) -> TileName {
        self.name
    }

    /// Tile rectangle
    pub const fn geometry(&self) -> &Rect<f64> {
        &self.geometry
    }

    /// Tile rectangle as a polygon
    pub fn polygon(&self) -> Polygon<f64> {
        self.geometry.to_polygon()
    }

    /// Planar area in squared coordinate units
    pub fn area(&self) -> f64 {
        self.geometry.width() * self.geometry.height()
    }
}

/// Ordered collection of uniquely named tiles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Create an empty set
    pub const fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Build a set, rejecting repeated names
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateTileName`] for the first repeated name
    pub fn try_from_tiles(tiles: Vec<Tile>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tiles.len());
        for tile in &tiles {
            if !seen.insert(tile.name) {
                return Err(GridError::DuplicateTileName {
                    name: tile.name.to_string(),
                });
            }
        }
        Ok(Self { tiles })
    }

    /// Build a set keeping the first tile seen for each name
    ///
    /// Returns the set and the number of duplicates dropped.
    pub fn dedup_by_name(tiles: Vec<Tile>) -> (Self, usize) {
        let original_len = tiles.len();
        let mut seen = HashSet::with_capacity(original_len);
        let unique: Vec<Tile> = tiles
            .into_iter()
            .filter(|tile| seen.insert(tile.name))
            .collect();
        let dropped = original_len - unique.len();
        (Self { tiles: unique }, dropped)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in insertion order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterate tiles in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Largest numeric suffix among the tile names
    pub fn max_index(&self) -> Option<u32> {
        self.tiles.iter().map(|tile| tile.name.index()).max()
    }

    /// Look up a tile by name
    pub fn get(&self, name: TileName) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.name == name)
    }

    /// Whether a tile with this name is present
    pub fn contains(&self, name: TileName) -> bool {
        self.get(name).is_some()
    }

    /// Tiles with exactly this name (zero or one)
    pub fn filter_by_name(&self, name: TileName) -> Self {
        self.filtered(|tile| tile.name == name)
    }

    /// Tiles satisfying a predicate, in insertion order
    pub fn filtered(&self, mut predicate: impl FnMut(&Tile) -> bool) -> Self {
        Self {
            tiles: self
                .tiles
                .iter()
                .filter(|tile| predicate(tile))
                .cloned()
                .collect(),
        }
    }

    /// Append another set, dropping tiles whose names are already present
    ///
    /// Returns the number of tiles dropped.
    pub fn merge(&mut self, other: Self) -> usize {
        let mut seen: HashSet<TileName> = self.tiles.iter().map(|tile| tile.name).collect();
        let before = self.tiles.len();
        let incoming = other.tiles.len();
        self.tiles
            .extend(other.tiles.into_iter().filter(|tile| seen.insert(tile.name)));
        incoming - (self.tiles.len() - before)
    }

    /// Bounding rectangle of all tiles
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let mut tiles = self.tiles.iter();
        let first = *tiles.next()?.geometry();
        Some(tiles.fold(first, |acc, tile| {
            let other = tile.geometry();
            Rect::new(
                Coord {
                    x: acc.min().x.min(other.min().x),
                    y: acc.min().y.min(other.min().y),
                },
                Coord {
                    x: acc.max().x.max(other.max().x),
                    y: acc.max().y.max(other.max().y),
                },
            )
        }))
    }
}

impl IntoIterator for TileSet {
    type Item = Tile;
    type IntoIter = std::vec::IntoIter<Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.into_iter()
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
