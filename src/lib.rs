//! texpost: a small static blog generator
//!
//! Turns a directory of `YYYY-MM-DD-slug.tex` (or `.md`) posts into one HTML
//! page per post plus a chronological index, all rendered through a single
//! embedded page template. Markup conversion is delegated to a [`Converter`],
//! by default the external `pandoc` tool.

pub mod assets;
pub mod config;
pub mod content;
pub mod converter;
pub mod generator;
pub mod helpers;
pub mod templates;

pub use config::SiteConfig;
pub use content::Post;
pub use converter::{ConversionError, Converter, MarkdownConverter, Pandoc};
pub use generator::{BuildSummary, Generator};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A resolved site: where content lives, where output goes, and its config
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: SiteConfig,
    /// Content directory (holds `posts/` and `assets/`)
    pub content_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Site {
    /// Create a site, loading the config file if it exists
    ///
    /// A missing config file falls back to [`SiteConfig::default`]; a config
    /// file that exists but cannot be parsed is an error.
    pub fn new<C, O, F>(content_dir: C, output_dir: O, config_path: F) -> Result<Self>
    where
        C: AsRef<Path>,
        O: AsRef<Path>,
        F: AsRef<Path>,
    {
        let config = SiteConfig::load_or_default(config_path)?;

        Ok(Self {
            config,
            content_dir: content_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
        })
    }

    /// Generate the static site with the converter selected by the config
    pub fn generate(&self) -> Result<BuildSummary> {
        let generator = Generator::from_config(self.config.clone());
        generator.generate(&self.content_dir, &self.output_dir)
    }
}
