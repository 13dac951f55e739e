//! Tests for naming, threshold and display constants

#[cfg(test)]
mod tests {
    use floodgrid::io::configuration::{
        CORNER_TOLERANCE, DEFAULT_MIN_COVERAGE, DEFAULT_OVERLAP_THRESHOLD, MAX_CANDIDATES,
        PROGRESS_UPDATE_INTERVAL, TILE_NAME_DIGITS, TILE_NAME_PREFIX,
    };

    // Tests the naming convention downstream tooling files artefacts under
    // Verified by changing the prefix
    #[test]
    fn test_tile_name_convention() {
        assert_eq!(TILE_NAME_PREFIX, "GRID");
        assert_eq!(TILE_NAME_DIGITS, 5);
    }

    // Tests default thresholds are valid fractions
    #[test]
    fn test_default_thresholds() {
        assert!((DEFAULT_OVERLAP_THRESHOLD - 0.9).abs() < f64::EPSILON);
        assert!((0.0..=1.0).contains(&DEFAULT_MIN_COVERAGE));
    }

    // Tests the candidate limit and redraw interval stay sensible
    #[test]
    fn test_limits() {
        assert_eq!(MAX_CANDIDATES, 10_000_000);
        assert!(PROGRESS_UPDATE_INTERVAL > 0);
        assert!(CORNER_TOLERANCE > 0.0 && CORNER_TOLERANCE < 1e-6);
    }
}
