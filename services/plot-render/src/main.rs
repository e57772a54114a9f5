//! Command-line image plot renderer.
//!
//! Loads a document of datasets plus image settings, draws the image onto an
//! off-screen surface and writes the result as PNG.

mod config;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::Args;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!(
        document = %args.document.display(),
        output = %args.output.display(),
        "Starting plot render"
    );

    let png = render::render(&args)?;
    std::fs::write(&args.output, &png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(bytes = png.len(), output = %args.output.display(), "Wrote PNG");
    Ok(())
}
