//! Tests for sequential tile numbering

#[cfg(test)]
mod tests {
    use floodgrid::algorithm::numbering::TileCounter;
    use floodgrid::spatial::tiles::{Tile, TileName, TileSet};

    // Tests numbering starts at zero without existing tiles
    #[test]
    fn test_after_nothing_starts_at_zero() {
        assert_eq!(TileCounter::after(None).ok(), Some(TileCounter::default()));
        assert_eq!(TileCounter::after(Some(&TileSet::new())).unwrap().peek(), 0);
    }

    // Tests numbering continues after the largest existing suffix
    // Verified by continuing after the last tile instead of the largest
    #[test]
    fn test_after_existing_continues() {
        let existing = TileSet::try_from_tiles(vec![
            Tile::square(TileName::new(42), 0.0, 0.0, 1.0),
            Tile::square(TileName::new(3), 1.0, 0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(TileCounter::after(Some(&existing)).unwrap().peek(), 43);
    }

    // Tests issued names are consecutive
    #[test]
    fn test_issue_sequence() {
        let mut counter = TileCounter::starting_at(7);
        let names: Vec<String> = (0..3).map(|_| counter.issue().unwrap().to_string()).collect();
        assert_eq!(names, vec!["GRID00007", "GRID00008", "GRID00009"]);
        assert_eq!(counter.peek(), 10);
    }

    // Tests an exhausted numeric space reports an error instead of wrapping
    #[test]
    fn test_exhaustion() {
        assert!(TileCounter::starting_at(u32::MAX).issue().is_err());

        let existing =
            TileSet::try_from_tiles(vec![Tile::square(TileName::new(u32::MAX), 0.0, 0.0, 1.0)])
                .unwrap();
        assert!(TileCounter::after(Some(&existing)).is_err());
    }
}
