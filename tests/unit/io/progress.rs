//! Tests for candidate progress tracking

#[cfg(test)]
mod tests {
    use floodgrid::algorithm::tiler::{GridTiler, TilingConfig, TilingObserver};
    use floodgrid::io::progress::ProgressManager;
    use floodgrid::spatial::region::Region;
    use floodgrid::spatial::tiles::{Tile, TileName};

    // Tests a fresh manager has no work recorded
    #[test]
    fn test_progress_manager_new() {
        let pm = ProgressManager::hidden();
        assert_eq!(pm.position(), 0);
        assert_eq!(pm.accepted(), 0);
        assert!(!pm.is_finished());
    }

    // Tests accepted tiles are counted on every call, not only on redraws
    // Verified by counting only when the bar is redrawn
    #[test]
    fn test_counts_between_redraws() {
        let mut pm = ProgressManager::hidden();
        pm.started(3);
        let tile = Tile::square(TileName::new(0), 0.0, 0.0, 1.0);
        pm.candidate_evaluated(1, Some(&tile));
        pm.candidate_evaluated(2, None);
        pm.candidate_evaluated(3, Some(&tile));

        assert_eq!(pm.length(), Some(3));
        assert_eq!(pm.accepted(), 2);
    }

    // Tests a full tiling run leaves the bar complete
    #[test]
    fn test_tiling_run_finishes_bar() {
        let tiler = GridTiler::new(TilingConfig::new(0.1)).unwrap();
        let region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let mut pm = ProgressManager::hidden();
        let outcome = tiler.tile_observed(&region, None, &mut pm).unwrap();

        assert_eq!(pm.position(), outcome.candidates as u64);
        assert_eq!(pm.accepted(), outcome.tiles.len());
        assert!(pm.is_finished());
    }
}
