pub mod args;
pub mod color;
pub mod commands;
pub mod validate;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use satwatch_route_core::config::Config;

/// Logs go to stderr so `analyze --json` output stays machine readable.
/// Level defaults to `warn`; override with `RUST_LOG`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = args::Cli::parse();

    let cfg = Config::load(cli.config.as_deref().map(Path::new))?.with_backend(cli.backend.clone())?;

    match &cli.cmd {
        args::Commands::Analyze(a) => {
            validate::validate_analyze(a)?;
            commands::analyze::run(cfg, a)
        }

        args::Commands::Gui => satwatch_route_gui::run(cfg),

        args::Commands::Config { path } => {
            commands::config::run(&cfg, cli.config.as_deref(), *path)
        }
    }
}
