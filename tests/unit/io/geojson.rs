//! Tests for reading and writing GeoJSON tile sets and areas of interest

#[cfg(test)]
mod tests {
    use floodgrid::io::geojson::{
        aoi_from_str, read_aoi, read_tile_set, read_tiles, tiles_from_str, tiles_to_string,
        write_tile_set,
    };
    use floodgrid::spatial::tiles::{Tile, TileName, TileSet};
    use floodgrid::{GridError, GridTiler, Region, TilingConfig};
    use tempfile::TempDir;

    fn sample_set() -> TileSet {
        TileSet::try_from_tiles(vec![
            Tile::square(TileName::new(0), -10.0, 45.0, 0.5),
            Tile::square(TileName::new(1), -10.0, 45.5, 0.5),
        ])
        .unwrap()
    }

    fn feature(name_key: &str, name: &str, ring: &str) -> String {
        format!(
            r#"{{"type":"Feature","properties":{{"{name_key}":"{name}"}},"geometry":{{"type":"Polygon","coordinates":[{ring}]}}}}"#
        )
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        )
    }

    const UNIT_RING: &str = "[[0,0],[1,0],[1,1],[0,1],[0,0]]";

    // Tests written tiles decode back to the same set
    #[test]
    fn test_encode_decode() {
        let set = sample_set();
        let text = tiles_to_string(&set).unwrap();
        assert!(text.contains("\"FeatureCollection\""));
        assert!(text.contains("\"GRID00001\""));

        let decoded = TileSet::try_from_tiles(tiles_from_str(&text).unwrap()).unwrap();
        assert_eq!(decoded, set);
    }

    // Tests decimal coordinates survive a write and read bit for bit
    // Verified by parsing floats with serde_json's default fast path
    #[test]
    fn test_decimal_coordinates_round_trip() {
        let region = Region::new(30.0, -2.0, 31.0, -1.0).unwrap();
        let first = GridTiler::new(TilingConfig::new(0.1))
            .unwrap()
            .tile(&region, None)
            .unwrap();
        assert_eq!(first.tiles.len(), 100);

        let text = tiles_to_string(&first.tiles).unwrap();
        let decoded = TileSet::try_from_tiles(tiles_from_str(&text).unwrap()).unwrap();
        assert_eq!(decoded, first.tiles);

        for threshold in [0.9, 1.0] {
            let tiler =
                GridTiler::new(TilingConfig::new(0.1).with_overlap_threshold(threshold)).unwrap();
            let rerun = tiler.tile(&region, Some(&decoded)).unwrap();
            assert!(rerun.tiles.is_empty(), "threshold {threshold}");
            assert_eq!(rerun.discarded, 100);
        }
    }

    // Tests the older property name is accepted
    #[test]
    fn test_patch_name_alias() {
        let text = collection(&[feature("patch_name", "GRID00012", UNIT_RING)]);
        let tiles = tiles_from_str(&text).unwrap();
        assert_eq!(tiles[0].name(), TileName::new(12));
    }

    // Tests features without a name are rejected with their position
    #[test]
    fn test_missing_name() {
        let text = collection(&[
            feature("name", "GRID00000", UNIT_RING),
            feature("label", "GRID00001", UNIT_RING),
        ]);
        match tiles_from_str(&text) {
            Err(GridError::InvalidGeometry { feature, .. }) => assert_eq!(feature, "#1"),
            other => unreachable!("Expected missing-name error, got {other:?}"),
        }
    }

    // Tests malformed names surface as name errors
    #[test]
    fn test_invalid_name() {
        let text = collection(&[feature("name", "TILE7", UNIT_RING)]);
        assert!(matches!(
            tiles_from_str(&text),
            Err(GridError::InvalidTileName { .. })
        ));
    }

    // Tests shapes that are not axis-aligned rectangles are rejected
    // Verified by accepting any ring whose vertices lie on its bounding box
    #[test]
    fn test_non_rectangle_rejected() {
        for ring in [
            "[[0,0],[1,0],[0,1],[0,0]]",
            "[[0,0],[1,0],[1,1],[0.5,1.5],[0,1],[0,0]]",
            "[[0,0],[1,0],[1,0],[0,0]]",
            "[]",
        ] {
            let text = collection(&[feature("name", "GRID00000", ring)]);
            assert!(
                matches!(
                    tiles_from_str(&text),
                    Err(GridError::InvalidGeometry { .. })
                ),
                "{ring} should be rejected"
            );
        }
    }

    // Tests rectangles stored as single-polygon multipolygons are accepted
    #[test]
    fn test_single_multipolygon() {
        let text = r#"{"type":"Feature","properties":{"name":"GRID00003"},
            "geometry":{"type":"MultiPolygon","coordinates":[[[[2,2],[3,2],[3,3],[2,3],[2,2]]]]}}"#;
        let tiles = tiles_from_str(text).unwrap();
        assert_eq!(tiles.len(), 1);
        assert!((tiles[0].geometry().min().x - 2.0).abs() < f64::EPSILON);
    }

    // Tests malformed JSON reports a serialization error
    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            tiles_from_str("{\"type\": \"FeatureCollection\", \"features\": ["),
            Err(GridError::Serialization { .. })
        ));
    }

    // Tests files round-trip through disk and duplicates are dropped on load
    #[test]
    fn test_file_io_and_dedup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiles.geojson");
        write_tile_set(&path, &sample_set()).unwrap();
        assert_eq!(read_tile_set(&path).ok(), Some(sample_set()));

        let dup_path = dir.path().join("dup.geojson");
        let text = collection(&[
            feature("name", "GRID00005", UNIT_RING),
            feature("name", "GRID00005", "[[4,4],[5,4],[5,5],[4,5],[4,4]]"),
        ]);
        std::fs::write(&dup_path, text).unwrap();

        assert_eq!(read_tiles(&dup_path).unwrap().len(), 2);
        let set = read_tile_set(&dup_path).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.tiles()[0].geometry().min().x.abs() < f64::EPSILON);
    }

    // Tests missing files report the path that failed
    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.geojson");
        match read_tile_set(&path) {
            Err(GridError::FileSystem { path: failed, .. }) => assert_eq!(failed, path),
            other => unreachable!("Expected file system error, got {other:?}"),
        }
    }

    // Tests areas of interest combine every polygon in the document
    #[test]
    fn test_aoi_from_collection() {
        let text = collection(&[
            feature("name", "west", UNIT_RING),
            feature("name", "east", "[[2,0],[4,0],[4,1],[2,1],[2,0]]"),
        ]);
        let aoi = aoi_from_str(&text).unwrap();
        assert!((aoi.area() - 3.0).abs() < 1e-9);

        let region = aoi.bounding_region().unwrap();
        assert!((region.max_x() - 4.0).abs() < f64::EPSILON);
    }

    // Tests a bare polygon document is a valid area of interest
    #[test]
    fn test_aoi_bare_polygon() {
        let aoi =
            aoi_from_str(r#"{"type":"Polygon","coordinates":[[[0,0],[2,0],[0,2],[0,0]]]}"#).unwrap();
        assert!((aoi.area() - 2.0).abs() < 1e-9);
    }

    // Tests an area of interest without polygons is rejected
    #[test]
    fn test_aoi_without_area() {
        assert!(aoi_from_str(r#"{"type":"FeatureCollection","features":[]}"#).is_err());

        let dir = TempDir::new().unwrap();
        assert!(read_aoi(&dir.path().join("absent.geojson")).is_err());
    }
}
