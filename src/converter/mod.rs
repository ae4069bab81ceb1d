//! Content conversion - turns one post source into an HTML fragment
//!
//! The generator only sees the [`Converter`] trait. Two backends exist:
//! [`Pandoc`] shells out to the `pandoc` tool, [`MarkdownConverter`] renders
//! Markdown in-process. Either way a failed conversion never aborts a build:
//! [`convert_or_fallback`] substitutes a fragment carrying an error notice and
//! the raw source.

mod markdown;
mod pandoc;

pub use markdown::MarkdownConverter;
pub use pandoc::Pandoc;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ConverterKind;
use crate::helpers::escape_html;

/// Errors raised by a converter backend
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}: {stderr}", status_text(.status))]
    Failed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Converts one source file into an HTML body fragment (no page chrome)
pub trait Converter {
    fn convert(&self, source: &Path) -> Result<String, ConversionError>;
}

/// Build the converter selected in the site config
pub fn from_kind(kind: ConverterKind) -> Box<dyn Converter> {
    match kind {
        ConverterKind::Pandoc => Box::new(Pandoc::new()),
        ConverterKind::Markdown => Box::new(MarkdownConverter::new()),
    }
}

/// Result of converting a post, possibly degraded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub html: String,
    /// True when conversion failed and `html` is the fallback
    pub degraded: bool,
}

/// Convert `source`, or fall back to an error notice plus the raw text
pub fn convert_or_fallback(converter: &dyn Converter, source: &Path, raw: &str) -> Fragment {
    match converter.convert(source) {
        Ok(html) => Fragment {
            html,
            degraded: false,
        },
        Err(e) => {
            tracing::warn!("Error converting {:?}: {}", source, e);
            Fragment {
                html: fallback_fragment(source, raw),
                degraded: true,
            }
        }
    }
}

/// Fragment published in place of a post whose conversion failed
pub fn fallback_fragment(source: &Path, raw: &str) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    format!(
        "<p><em>Error converting source (converter might be missing): {}</em></p><pre>{}</pre>",
        escape_html(&name),
        escape_html(raw)
    )
}
