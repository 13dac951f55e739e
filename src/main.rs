//! CLI entry point for sampling-grid generation

use clap::Parser;
use floodgrid::io::cli::{Cli, CommandRunner};
use floodgrid::io::logging::init_logging;

fn main() -> floodgrid::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity())?;
    let runner = CommandRunner::new(cli);
    runner.run()
}
