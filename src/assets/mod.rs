//! Asset pipeline - validates and copies static files into the output tree

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Assets above this size are copied with a warning
pub const LARGE_ASSET_BYTES: u64 = 10 * 1024 * 1024;

/// What the asset pipeline did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetReport {
    /// Files copied, including oversized ones
    pub copied: usize,
    /// Zero-length files that were skipped
    pub skipped_empty: usize,
    /// Files over [`LARGE_ASSET_BYTES`]
    pub oversized: usize,
}

/// Copy every file directly inside `source_dir` into `dest_dir`
///
/// Empty files are skipped with a warning; files over 10 MB are copied with a
/// warning. Existing files in `dest_dir` are overwritten. A missing
/// `source_dir` is not an error.
pub fn copy_assets(source_dir: &Path, dest_dir: &Path) -> Result<AssetReport> {
    let mut report = AssetReport::default();

    if !source_dir.is_dir() {
        tracing::debug!("No assets directory at {:?}", source_dir);
        return Ok(report);
    }

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create assets directory {:?}", dest_dir))?;

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry.with_context(|| format!("Failed to list {:?}", source_dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let size = fs::metadata(path)
            .with_context(|| format!("Failed to stat {:?}", path))?
            .len();

        if size == 0 {
            tracing::warn!("Empty asset file: {:?}", path);
            report.skipped_empty += 1;
            continue;
        }

        if size > LARGE_ASSET_BYTES {
            tracing::warn!(
                "Large asset (>10MB): {:?} ({}MB)",
                path,
                size / 1024 / 1024
            );
            report.oversized += 1;
        }

        let dest = dest_dir.join(entry.file_name());
        fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
        tracing::info!("Copied asset: {}", entry.file_name().to_string_lossy());
        report.copied += 1;
    }

    Ok(report)
}
