mod cli;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    cli::init_logging();
    cli::run()
}
