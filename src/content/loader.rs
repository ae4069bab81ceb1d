//! Source discovery - finds post sources in the posts directory

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions recognised as post sources
pub const SOURCE_EXTENSIONS: &[&str] = &["tex", "md"];

/// List post sources directly inside `posts_dir`, in directory iteration order
///
/// Returns an empty list when the directory does not exist.
pub fn find_sources(posts_dir: &Path) -> Vec<PathBuf> {
    if !posts_dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(posts_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {:?}: {}", posts_dir, e);
                None
            }
        })
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_source_file(path))
        .collect()
}

/// Check if a file is a post source
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SOURCE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("posts/2024-01-01-a.tex")));
        assert!(is_source_file(Path::new("posts/2024-01-01-a.md")));
        assert!(!is_source_file(Path::new("posts/notes.txt")));
        assert!(!is_source_file(Path::new("posts/README")));
    }

    #[test]
    fn test_find_sources_is_flat_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(posts.join("nested")).unwrap();
        fs::write(posts.join("2024-01-01-a.tex"), "a").unwrap();
        fs::write(posts.join("2024-01-02-b.md"), "b").unwrap();
        fs::write(posts.join("image.png"), "x").unwrap();
        fs::write(posts.join("nested").join("2024-01-03-c.tex"), "c").unwrap();

        let mut found: Vec<_> = find_sources(&posts)
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        found.sort();
        assert_eq!(found, ["2024-01-01-a.tex", "2024-01-02-b.md"]);
    }

    #[test]
    fn test_missing_dir_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_sources(&dir.path().join("posts")).is_empty());
    }
}
