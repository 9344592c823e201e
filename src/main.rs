use clap::Parser;
use ev_station_locator::cli::{run, Cli};
use ev_station_locator::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
