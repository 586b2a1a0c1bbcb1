//! CLI entry point for the tile map generator

use clap::Parser;
use tilewave::io::cli::{Cli, MapRunner};
use tilewave::io::logging::init_logging;

fn main() -> tilewave::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose)?;
    let runner = MapRunner::new(cli);
    runner.run().map(|_| ())
}
