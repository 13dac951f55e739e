//! GeoJSON persistence for tile sets and areas of interest
//!
//! Tile sets are written as a `FeatureCollection` of rectangle polygons with
//! a `name` property. On read, the `patch_name` property used by older grid
//! files is accepted as well.

use crate::io::configuration::CORNER_TOLERANCE;
use crate::io::error::{GridError, Result, WithPath, invalid_geometry};
use crate::spatial::aoi::AreaOfInterest;
use crate::spatial::tiles::{Tile, TileName, TileSet};
use geo::{Coord, LineString, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const NAME_PROPERTY: &str = "name";
const LEGACY_NAME_PROPERTY: &str = "patch_name";

type Position = Vec<f64>;
type Ring = Vec<Position>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Document {
    FeatureCollection { features: Vec<Feature> },
    Feature(Feature),
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
struct TileCollection {
    features: Vec<TileFeature>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "Feature")]
struct TileFeature {
    properties: Map<String, Value>,
    geometry: Geometry,
}

impl TileFeature {
    fn from_tile(tile: &Tile) -> Self {
        let mut properties = Map::new();
        properties.insert(
            NAME_PROPERTY.to_string(),
            Value::String(tile.name().to_string()),
        );
        Self {
            properties,
            geometry: Geometry::Polygon {
                coordinates: vec![rect_ring(tile.geometry())],
            },
        }
    }
}

impl Document {
    /// Flatten any accepted document shape into features
    fn into_features(self) -> Vec<Feature> {
        match self {
            Self::FeatureCollection { features } => features,
            Self::Feature(feature) => vec![feature],
            Self::Polygon { coordinates } => vec![Feature::bare(Geometry::Polygon { coordinates })],
            Self::MultiPolygon { coordinates } => {
                vec![Feature::bare(Geometry::MultiPolygon { coordinates })]
            }
        }
    }
}

impl Feature {
    const fn bare(geometry: Geometry) -> Self {
        Self {
            properties: None,
            geometry: Some(geometry),
        }
    }

    fn name(&self) -> Option<&str> {
        let properties = self.properties.as_ref()?;
        properties
            .get(NAME_PROPERTY)
            .or_else(|| properties.get(LEGACY_NAME_PROPERTY))
            .and_then(Value::as_str)
    }

    fn to_tile(&self, index: usize) -> Result<Tile> {
        let label = || format!("#{index}");
        let name = self
            .name()
            .ok_or_else(|| invalid_geometry(&label(), &"missing 'name' property"))?;
        let name: TileName = name.parse()?;
        let describe = || format!("#{index} ({name})");

        let exterior = match &self.geometry {
            Some(Geometry::Polygon { coordinates }) => coordinates.first(),
            Some(Geometry::MultiPolygon { coordinates }) if coordinates.len() == 1 => {
                coordinates.first().and_then(|polygon| polygon.first())
            }
            Some(Geometry::MultiPolygon { .. }) => {
                return Err(invalid_geometry(
                    &describe(),
                    &"tile must be a single polygon",
                ));
            }
            None => return Err(invalid_geometry(&describe(), &"missing geometry")),
        }
        .ok_or_else(|| invalid_geometry(&describe(), &"polygon has no exterior ring"))?;

        let rect = ring_to_rect(exterior).map_err(|reason| invalid_geometry(&describe(), &reason))?;
        Ok(Tile::new(name, rect))
    }

    fn polygons(&self, index: usize) -> Result<Vec<Polygon<f64>>> {
        let label = format!("#{index}");
        match &self.geometry {
            Some(Geometry::Polygon { coordinates }) => Ok(vec![build_polygon(coordinates, &label)?]),
            Some(Geometry::MultiPolygon { coordinates }) => coordinates
                .iter()
                .map(|rings| build_polygon(rings, &label))
                .collect(),
            None => Ok(Vec::new()),
        }
    }
}

fn rect_ring(rect: &Rect<f64>) -> Ring {
    let (min, max) = (rect.min(), rect.max());
    vec![
        vec![min.x, min.y],
        vec![max.x, min.y],
        vec![max.x, max.y],
        vec![min.x, max.y],
        vec![min.x, min.y],
    ]
}

fn position_to_coord(position: &[f64]) -> std::result::Result<Coord<f64>, String> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
        [_, _, ..] => Err("coordinates must be finite".to_string()),
        _ => Err(format!(
            "position needs at least two values, got {}",
            position.len()
        )),
    }
}

/// Interpret a ring as an axis-aligned rectangle
fn ring_to_rect(ring: &[Position]) -> std::result::Result<Rect<f64>, String> {
    let coords = ring
        .iter()
        .map(|position| position_to_coord(position))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let first = coords.first().ok_or_else(|| "ring is empty".to_string())?;
    let (mut min, mut max) = (*first, *first);
    for coord in &coords {
        min.x = min.x.min(coord.x);
        min.y = min.y.min(coord.y);
        max.x = max.x.max(coord.x);
        max.y = max.y.max(coord.y);
    }

    if max.x - min.x <= 0.0 || max.y - min.y <= 0.0 {
        return Err("rectangle has no area".to_string());
    }

    let on_edge = |value: f64, low: f64, high: f64| {
        (value - low).abs() <= CORNER_TOLERANCE || (value - high).abs() <= CORNER_TOLERANCE
    };
    if let Some(stray) = coords
        .iter()
        .find(|c| !on_edge(c.x, min.x, max.x) || !on_edge(c.y, min.y, max.y))
    {
        return Err(format!(
            "vertex ({}, {}) is not a corner of an axis-aligned rectangle",
            stray.x, stray.y
        ));
    }

    let corners = [
        (min.x, min.y),
        (max.x, min.y),
        (max.x, max.y),
        (min.x, max.y),
    ];
    if let Some((x, y)) = corners.into_iter().find(|&(x, y)| {
        !coords
            .iter()
            .any(|c| (c.x - x).abs() <= CORNER_TOLERANCE && (c.y - y).abs() <= CORNER_TOLERANCE)
    }) {
        return Err(format!("corner ({x}, {y}) is missing"));
    }

    Ok(Rect::new(min, max))
}

fn build_line_string(ring: &[Position], label: &str) -> Result<LineString<f64>> {
    ring.iter()
        .map(|position| position_to_coord(position))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(LineString::from)
        .map_err(|reason| invalid_geometry(&label, &reason))
}

fn build_polygon(rings: &[Ring], label: &str) -> Result<Polygon<f64>> {
    let (exterior, interiors) = rings
        .split_first()
        .ok_or_else(|| invalid_geometry(&label, &"polygon has no exterior ring"))?;
    let exterior = build_line_string(exterior, label)?;
    let interiors = interiors
        .iter()
        .map(|ring| build_line_string(ring, label))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn tile_document(tiles: &TileSet) -> TileCollection {
    TileCollection {
        features: tiles.iter().map(TileFeature::from_tile).collect(),
    }
}

fn parse_document(text: &str, path: &Path) -> Result<Document> {
    serde_json::from_str(text).map_err(|source| GridError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode tiles from GeoJSON text, keeping duplicates
///
/// # Errors
///
/// Returns an error if the text is not GeoJSON, a feature lacks a valid
/// name, or a geometry is not an axis-aligned rectangle
pub fn tiles_from_str(text: &str) -> Result<Vec<Tile>> {
    tiles_from_document(parse_document(text, Path::new("<memory>"))?)
}

fn tiles_from_document(document: Document) -> Result<Vec<Tile>> {
    document
        .into_features()
        .iter()
        .enumerate()
        .map(|(index, feature)| feature.to_tile(index))
        .collect()
}

/// Encode tiles as a pretty-printed GeoJSON `FeatureCollection`
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn tiles_to_string(tiles: &TileSet) -> Result<String> {
    serde_json::to_string_pretty(&tile_document(tiles)).map_err(|source| GridError::Serialization {
        path: PathBuf::from("<memory>"),
        source,
    })
}

/// Decode an area of interest from GeoJSON text
///
/// Every polygon in the document is combined into a single multipolygon.
///
/// # Errors
///
/// Returns an error if the text is not GeoJSON or contains no area
pub fn aoi_from_str(text: &str) -> Result<AreaOfInterest> {
    aoi_from_document(parse_document(text, Path::new("<memory>"))?)
}

fn aoi_from_document(document: Document) -> Result<AreaOfInterest> {
    let mut polygons = Vec::new();
    for (index, feature) in document.into_features().iter().enumerate() {
        polygons.extend(feature.polygons(index)?);
    }
    AreaOfInterest::new(MultiPolygon::new(polygons))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_path(path, "read")
}

/// Read tiles from a GeoJSON file, keeping duplicates
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn read_tiles(path: &Path) -> Result<Vec<Tile>> {
    let text = read_text(path)?;
    tiles_from_document(parse_document(&text, path)?)
}

/// Read a tile set, keeping the first tile for each repeated name
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn read_tile_set(path: &Path) -> Result<TileSet> {
    let (tiles, dropped) = TileSet::dedup_by_name(read_tiles(path)?);
    if dropped > 0 {
        tracing::warn!(
            path = %path.display(),
            dropped,
            "Removed tiles with duplicate names"
        );
    }
    tracing::info!(path = %path.display(), tiles = tiles.len(), "Loaded tile set");
    Ok(tiles)
}

/// Read an area of interest from a GeoJSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read, decoded, or has no area
pub fn read_aoi(path: &Path) -> Result<AreaOfInterest> {
    let text = read_text(path)?;
    aoi_from_document(parse_document(&text, path)?)
}

/// Write a tile set to a GeoJSON file, replacing any existing file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn write_tile_set(path: &Path, tiles: &TileSet) -> Result<()> {
    let document = tile_document(tiles);
    let file = File::create(path).with_path(path, "create")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document).map_err(|source| {
        GridError::Serialization {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").with_path(path, "write")?;
    writer.flush().with_path(path, "flush")?;

    tracing::info!(path = %path.display(), tiles = tiles.len(), "Wrote tile set");
    Ok(())
}
