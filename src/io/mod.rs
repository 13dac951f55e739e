/// Command-line parsing and command execution
pub mod cli;
/// Constants and default parameter values
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// GeoJSON encoding of tile sets and areas of interest
pub mod geojson;
/// Subscriber setup for structured logging
pub mod logging;
/// Progress display for tiling runs
pub mod progress;
