//! Grid constants and runtime configuration defaults

// Tile naming
/// Prefix shared by every tile name
pub const TILE_NAME_PREFIX: &str = "GRID";
/// Minimum number of zero-padded digits after the prefix
pub const TILE_NAME_DIGITS: usize = 5;

/// Fraction of a candidate's area that must already be covered before it is discarded
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.9;

/// Minimum AoI coverage for tile selection (any positive overlap)
pub const DEFAULT_MIN_COVERAGE: f64 = 0.0;

// Safety limit to prevent runaway enumeration from tiny steps
/// Maximum number of candidate tiles a single call may evaluate
pub const MAX_CANDIDATES: usize = 10_000_000;

/// Tolerance when checking that polygon vertices sit on bounding-box corners
pub const CORNER_TOLERANCE: f64 = 1e-9;

// Progress bar display settings
/// Width of the candidate progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Candidates between progress bar redraws
pub const PROGRESS_UPDATE_INTERVAL: usize = 256;

// Log filter directives
/// Filter used with `--quiet`
pub const QUIET_LOG_DIRECTIVE: &str = "warn";
/// Filter used by default
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";
/// Filter used with `--verbose`
pub const VERBOSE_LOG_DIRECTIVE: &str = "debug";
