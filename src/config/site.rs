//! Site configuration (config.json)

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder inside the footer that is replaced with the current year
pub const YEAR_TOKEN: &str = "{{YEAR}}";

/// Errors raised while loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which backend turns post sources into HTML fragments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// Shell out to `pandoc`
    #[default]
    Pandoc,
    /// Render Markdown in-process
    Markdown,
}

/// Main site configuration
///
/// Keys are matched case-insensitively when loaded through [`SiteConfig::from_json`],
/// so `siteTitle`, `SiteTitle` and `sitetitle` are equivalent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    #[serde(rename = "sitetitle")]
    pub site_title: String,
    pub author: String,
    #[serde(rename = "baseurl")]
    pub base_url: String,
    pub description: String,
    /// Footer text; may contain `{{YEAR}}`
    pub footer: String,
    pub converter: ConverterKind,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "My Blog".to_string(),
            author: "Missing".to_string(),
            base_url: "https://blog.missing.com".to_string(),
            description: "A blog".to_string(),
            footer: YEAR_TOKEN.to_string(),
            converter: ConverterKind::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        tracing::info!("Loaded config: {}", config.site_title);
        Ok(config)
    }

    /// Load configuration, falling back to the defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            tracing::warn!("Config {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Parse a JSON document, ignoring the case of top-level keys
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let value = match serde_json::from_str::<Value>(content)? {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key.to_ascii_lowercase(), value))
                    .collect(),
            ),
            other => other,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Footer text with `{{YEAR}}` replaced by `year`
    pub fn footer_for_year(&self, year: i32) -> String {
        self.footer.replace(YEAR_TOKEN, &year.to_string())
    }
}
