//! Command-line interface for generating and selecting grid tiles

use crate::algorithm::tiler::{GridTiler, TilingConfig, TilingOutcome};
use crate::io::configuration::{DEFAULT_MIN_COVERAGE, DEFAULT_OVERLAP_THRESHOLD};
use crate::io::error::{Result, invalid_parameter};
use crate::io::geojson::{read_aoi, read_tile_set, write_tile_set};
use crate::io::logging::Verbosity;
use crate::io::progress::ProgressManager;
use crate::spatial::region::{Region, Step};
use crate::spatial::tiles::{TileName, TileSet};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "floodgrid")]
#[command(
    author,
    version,
    about = "Generate uniquely named sampling grids for flood mapping"
)]
/// Command-line arguments for the grid tool
pub struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log per-step diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Logging level requested by the flags
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Lay out new tiles over a region, skipping ground already covered
    Generate(GenerateArgs),
    /// Pick tiles from an existing set by area of interest or name
    Select(SelectArgs),
}

/// Arguments for `floodgrid generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// Region to cover as min_x,min_y,max_x,max_y
    #[arg(
        short,
        long,
        value_name = "MIN_X,MIN_Y,MAX_X,MAX_Y",
        allow_hyphen_values = true,
        required_unless_present = "aoi"
    )]
    pub region: Option<Region>,

    /// GeoJSON area of interest whose bounding box is covered when no region is given
    #[arg(short, long, value_name = "FILE")]
    pub aoi: Option<PathBuf>,

    /// Side length of each square tile
    #[arg(short, long)]
    pub tile_size: f64,

    /// Spacing between tile origins as X,Y or a single value (defaults to the tile size)
    #[arg(short, long, value_name = "X[,Y]")]
    pub step: Option<Step>,

    /// Previously generated tiles to continue numbering from and avoid
    #[arg(short, long, value_name = "FILE")]
    pub existing: Option<PathBuf>,

    /// Covered fraction at or above which a candidate is skipped
    #[arg(long, default_value_t = DEFAULT_OVERLAP_THRESHOLD)]
    pub overlap_threshold: f64,

    /// GeoJSON file receiving only the new tiles
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// GeoJSON file receiving the existing tiles followed by the new ones
    #[arg(short, long, value_name = "FILE")]
    pub merged: Option<PathBuf>,

    /// Replace output files that already exist
    #[arg(long)]
    pub overwrite: bool,
}

impl GenerateArgs {
    /// Tiling configuration described by the arguments
    pub fn tiling_config(&self) -> TilingConfig {
        TilingConfig::new(self.tile_size)
            .with_step(self.step.unwrap_or(Step::uniform(self.tile_size)))
            .with_overlap_threshold(self.overlap_threshold)
    }

    /// Region to tile, taken from `--region` or the AoI bounding box
    ///
    /// # Errors
    ///
    /// Returns an error if neither is given or the AoI cannot be read
    pub fn resolve_region(&self) -> Result<Region> {
        if let Some(region) = self.region {
            return Ok(region);
        }
        let path = self.aoi.as_deref().ok_or_else(|| {
            invalid_parameter("region", &"<none>", &"pass --region or --aoi")
        })?;
        let region = read_aoi(path)?.bounding_region()?;
        tracing::info!(aoi = %path.display(), region = %region, "Using AoI bounding box");
        Ok(region)
    }
}

/// Arguments for `floodgrid select`
#[derive(Args)]
pub struct SelectArgs {
    /// GeoJSON tile set to select from
    #[arg(long, value_name = "FILE")]
    pub tiles: PathBuf,

    /// GeoJSON area of interest the selected tiles must overlap
    #[arg(short, long, value_name = "FILE", required_unless_present = "name")]
    pub aoi: Option<PathBuf>,

    /// Keep only the tile with this name
    #[arg(short, long, value_name = "GRIDnnnnn")]
    pub name: Option<TileName>,

    /// Minimum fraction of a tile's area inside the AoI
    #[arg(long, default_value_t = DEFAULT_MIN_COVERAGE)]
    pub min_coverage: f64,

    /// GeoJSON file receiving the selected tiles
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Replace the output file if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// Runs the parsed command against the filesystem
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, reading, tiling or writing fails
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Generate(args) => self.generate(args).map(|_| ()),
            Command::Select(args) => self.select(args).map(|_| ()),
        }
    }

    /// Generate new tiles and write them out
    ///
    /// # Errors
    ///
    /// Returns an error if an output exists without `--overwrite`, an input
    /// cannot be read, or the tiling parameters are invalid
    pub fn generate(&self, args: &GenerateArgs) -> Result<TilingOutcome> {
        let start_time = Instant::now();

        ensure_writable(&args.output, args.overwrite)?;
        if let Some(merged) = &args.merged {
            ensure_writable(merged, args.overwrite)?;
        }

        let tiler = GridTiler::new(args.tiling_config())?;
        let region = args.resolve_region()?;
        let existing = args.existing.as_deref().map(read_tile_set).transpose()?;

        tracing::info!(
            region = %region,
            tile_size = tiler.config().tile_size,
            step = %tiler.config().step,
            overlap_threshold = tiler.config().overlap_threshold,
            existing = existing.as_ref().map_or(0, TileSet::len),
            "Generating grid"
        );

        let outcome = if self.cli.should_show_progress() {
            tiler.tile_observed(&region, existing.as_ref(), &mut ProgressManager::new())?
        } else {
            tiler.tile(&region, existing.as_ref())?
        };

        write_tile_set(&args.output, &outcome.tiles)?;

        if let Some(merged_path) = &args.merged {
            let mut merged = existing.unwrap_or_default();
            let dropped = merged.merge(outcome.tiles.clone());
            if dropped > 0 {
                tracing::warn!(dropped, "New tiles collided with existing names");
            }
            write_tile_set(merged_path, &merged)?;
        }

        tracing::info!(
            new = outcome.tiles.len(),
            discarded = outcome.discarded,
            next = %TileName::new(outcome.counter.peek()),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Grid generation complete"
        );

        Ok(outcome)
    }

    /// Select tiles by name and/or area of interest and write them out
    ///
    /// # Errors
    ///
    /// Returns an error if the output exists without `--overwrite`, an input
    /// cannot be read, or the requested name is not in the tile set
    pub fn select(&self, args: &SelectArgs) -> Result<TileSet> {
        ensure_writable(&args.output, args.overwrite)?;
        if !(0.0..=1.0).contains(&args.min_coverage) {
            return Err(invalid_parameter(
                "min_coverage",
                &args.min_coverage,
                &"must lie in [0, 1]",
            ));
        }

        let mut tiles = read_tile_set(&args.tiles)?;

        if let Some(name) = args.name {
            tiles = tiles.filter_by_name(name);
            if tiles.is_empty() {
                return Err(invalid_parameter(
                    "name",
                    &name,
                    &"not found in the tile set",
                ));
            }
            tracing::info!(name = %name, "Selecting a single tile");
        }

        if let Some(aoi_path) = &args.aoi {
            let aoi = read_aoi(aoi_path)?;
            let before = tiles.len();
            tiles = aoi.select(&tiles, args.min_coverage);
            tracing::info!(
                aoi = %aoi_path.display(),
                candidates = before,
                selected = tiles.len(),
                "Selected tiles overlapping the area of interest"
            );
        }

        if tiles.is_empty() {
            tracing::warn!("No tiles matched the selection");
        }

        write_tile_set(&args.output, &tiles)?;
        Ok(tiles)
    }
}

fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(invalid_parameter(
            "output",
            &path.display(),
            &"file exists; pass --overwrite to replace it",
        ));
    }
    Ok(())
}
