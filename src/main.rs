//! CLI entry point for the reviewer sheet normalizer.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app;
mod cli;

use app::config::{PipelineConfig, load_default_file_config};
use app::{runtime, terminal};
use cli::Args;

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    terminal::init_tracing(args.log_level(), terminal::is_no_color_requested(&args));
    debug!(?args, "CLI arguments parsed");

    let file_config = load_default_file_config()?;
    let config = PipelineConfig::resolve(&args, file_config.as_ref());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = rt.block_on(runtime::run(&config))?;
    summary.log();
    Ok(())
}
