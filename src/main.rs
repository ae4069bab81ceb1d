//! CLI entry point for texpost

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "texpost")]
#[command(version)]
#[command(about = "Build a static blog from date-slugged LaTeX and Markdown posts", long_about = None)]
struct Cli {
    /// Content directory holding posts/ and assets/ (defaults to ./content)
    content_dir: Option<PathBuf>,

    /// Output directory (defaults to ./dist)
    output_dir: Option<PathBuf>,

    /// Site config file (defaults to ./config.json)
    config: Option<PathBuf>,
}

/// Default content, output and config paths relative to `cwd`
///
/// When `cwd/content` is missing but `cwd/../content` exists, all three
/// defaults move to the parent directory.
fn default_paths(cwd: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let base = if !cwd.join("content").is_dir() && cwd.join("..").join("content").is_dir() {
        cwd.join("..")
    } else {
        cwd.to_path_buf()
    };
    (
        base.join("content"),
        base.join("dist"),
        base.join("config.json"),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "texpost=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cwd = std::env::current_dir()?;
    let (content_default, output_default, config_default) = default_paths(&cwd);
    let content_dir = cli.content_dir.unwrap_or(content_default);
    let output_dir = cli.output_dir.unwrap_or(output_default);
    let config_path = cli.config.unwrap_or(config_default);

    tracing::info!("Content directory: {:?}", content_dir);
    tracing::info!("Output directory: {:?}", output_dir);
    tracing::info!("Config file: {:?}", config_path);

    let site = texpost::Site::new(&content_dir, &output_dir, &config_path)?;
    site.generate()?;

    tracing::info!("Site generation complete");
    Ok(())
}
