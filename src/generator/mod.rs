//! Generator module - builds post pages and the index page
//!
//! A build is a single synchronous pass:
//!
//! 1. create the output directory
//! 2. copy `content/assets/*` to `dist/assets/`
//! 3. for each source in `content/posts/`: parse its name, find its title,
//!    convert it and write `dist/<slug>.html`
//! 4. sort the posts newest first and write `dist/index.html`
//!
//! Steps 1 and 2 can fail the build, as can the final index write. Per-post
//! problems are logged and degrade to fallbacks.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local};
use std::fs;
use std::path::Path;

use crate::assets::{self, AssetReport};
use crate::config::SiteConfig;
use crate::content::{extract_title, loader, parse_file_name, sort_newest_first, Post};
use crate::converter::{self, Converter};
use crate::helpers::link_to;
use crate::templates::{render_page, PageValues, HOME_NAV};

/// What a build produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Post pages written
    pub posts_written: usize,
    /// Posts published with the conversion-failure fallback
    pub posts_degraded: usize,
    /// Sources skipped because they could not be read or written
    pub posts_skipped: usize,
    pub assets: AssetReport,
    /// False when there was no posts directory
    pub index_written: bool,
}

/// Static site generator
pub struct Generator {
    config: SiteConfig,
    converter: Box<dyn Converter>,
    build_time: DateTime<Local>,
}

impl Generator {
    /// Create a generator with an explicit converter
    pub fn new(config: SiteConfig, converter: Box<dyn Converter>) -> Self {
        Self {
            config,
            converter,
            build_time: Local::now(),
        }
    }

    /// Create a generator using the converter named in the config
    pub fn from_config(config: SiteConfig) -> Self {
        let converter = converter::from_kind(config.converter);
        Self::new(config, converter)
    }

    /// Pin the build time used for undated posts and the footer year
    pub fn with_build_time(mut self, build_time: DateTime<Local>) -> Self {
        self.build_time = build_time;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Generate the entire site
    pub fn generate(&self, content_dir: &Path, output_dir: &Path) -> Result<BuildSummary> {
        let start = std::time::Instant::now();

        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

        let mut summary = BuildSummary {
            assets: assets::copy_assets(&content_dir.join("assets"), &output_dir.join("assets"))?,
            ..BuildSummary::default()
        };

        let posts_dir = content_dir.join("posts");
        if !posts_dir.is_dir() {
            // no posts directory: assets only, no index
            tracing::info!("No posts directory at {:?}, skipping posts", posts_dir);
            return Ok(summary);
        }

        let footer = self.footer();
        let mut posts = Vec::new();

        for source in loader::find_sources(&posts_dir) {
            match self.build_post(&source, output_dir, &footer) {
                Ok((post, degraded)) => {
                    summary.posts_written += 1;
                    if degraded {
                        summary.posts_degraded += 1;
                    }
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Skipping post {:?}: {:#}", source, e);
                    summary.posts_skipped += 1;
                }
            }
        }

        sort_newest_first(&mut posts);
        let index_path = output_dir.join("index.html");
        fs::write(&index_path, self.render_index(&posts, &footer))
            .with_context(|| format!("Failed to write {:?}", index_path))?;
        tracing::info!("Generated: {:?}", index_path);
        summary.index_written = true;

        tracing::info!(
            "Generated {} posts ({} degraded, {} skipped) in {:.2}s",
            summary.posts_written,
            summary.posts_degraded,
            summary.posts_skipped,
            start.elapsed().as_secs_f64()
        );

        Ok(summary)
    }

    /// Build one post from its source and write its page
    fn build_post(&self, source: &Path, output_dir: &Path, footer: &str) -> Result<(Post, bool)> {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let name = parse_file_name(&stem, self.build_time.date_naive());
        if !name.dated {
            tracing::warn!(
                "No YYYY-MM-DD prefix in {:?}, dating it {}",
                source,
                name.date
            );
        }

        let raw = fs::read_to_string(source)
            .with_context(|| format!("Failed to read {:?}", source))?;

        let title = match extract_title(&raw) {
            Some(title) => title.to_string(),
            None => {
                tracing::warn!("No \\title in {:?}, using slug {}", source, name.slug);
                name.slug.clone()
            }
        };

        let fragment = converter::convert_or_fallback(self.converter.as_ref(), source, &raw);

        let post = Post {
            slug: name.slug,
            title,
            date: name.date,
            content_html: fragment.html,
            author: self.config.author.clone(),
        };

        let output_file = output_dir.join(post.file_name());
        fs::write(&output_file, self.render_post(&post, footer))
            .with_context(|| format!("Failed to write {:?}", output_file))?;
        tracing::info!("Generated: {:?}", output_file);

        Ok((post, fragment.degraded))
    }

    /// Render a standalone post page
    pub fn render_post(&self, post: &Post, footer: &str) -> String {
        let date = post.display_date();
        render_page(&PageValues {
            title: &post.title,
            date: &date,
            author: &post.author,
            content: &post.content_html,
            nav: HOME_NAV,
            footer,
        })
    }

    /// Render the index page for posts already in display order
    pub fn render_index(&self, posts: &[Post], footer: &str) -> String {
        let mut list = String::from("<ul>\n");
        for post in posts {
            list.push_str(&format!(
                "<li><span>{}</span> - {}</li>\n",
                post.iso_date(),
                link_to(&post.file_name(), &post.title)
            ));
        }
        list.push_str("</ul>\n");

        render_page(&PageValues {
            title: &self.config.site_title,
            date: "",
            author: "",
            content: &list,
            nav: "",
            footer,
        })
    }

    /// Footer with the build year substituted
    pub fn footer(&self) -> String {
        self.config.footer_for_year(self.build_time.year())
    }
}
