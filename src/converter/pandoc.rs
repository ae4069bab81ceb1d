//! External pandoc backend

use std::path::Path;
use std::process::{Command, Stdio};

use super::{ConversionError, Converter};

/// Runs `pandoc <source> -f <reader> -t html --mathjax` per post
///
/// `--mathjax` keeps math as `\(..\)`/`\[..\]` markers for client-side
/// typesetting by the MathJax script in the page template.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: String,
}

impl Pandoc {
    /// Use `pandoc` from `PATH`
    pub fn new() -> Self {
        Self::with_program("pandoc")
    }

    /// Use a specific executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Pandoc reader name for a source file
    pub fn reader_for(source: &Path) -> &'static str {
        match source.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("markdown") => "markdown",
            _ => "latex",
        }
    }
}

impl Default for Pandoc {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for Pandoc {
    fn convert(&self, source: &Path) -> Result<String, ConversionError> {
        tracing::debug!("Running {} on {:?}", self.program, source);

        // output() drains stdout and stderr concurrently while waiting for exit
        let output = Command::new(&self.program)
            .arg(source)
            .args(["-f", Self::reader_for(source), "-t", "html", "--mathjax"])
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ConversionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(ConversionError::Failed {
                program: self.program.clone(),
                status: output.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            tracing::debug!("{} reported for {:?}: {}", self.program, source, stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reader_for() {
        assert_eq!(Pandoc::reader_for(Path::new("a.tex")), "latex");
        assert_eq!(Pandoc::reader_for(Path::new("a.md")), "markdown");
        assert_eq!(Pandoc::reader_for(Path::new("a")), "latex");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let pandoc = Pandoc::with_program("texpost-no-such-converter");
        let err = pandoc.convert(Path::new("a.tex")).unwrap_err();
        assert!(matches!(err, ConversionError::Spawn { .. }));
    }

    // `sh <source> -f ...` runs the source as a script, standing in for pandoc
    #[cfg(unix)]
    #[test]
    fn test_stdout_becomes_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("2024-01-01-a.tex");
        fs::write(&source, "echo '<p>hi</p>'\necho 'warning: ignored' >&2\n").unwrap();

        let html = Pandoc::with_program("sh").convert(&source).unwrap();
        assert_eq!(html.trim(), "<p>hi</p>");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("2024-01-01-a.tex");
        fs::write(&source, "echo 'bad input' >&2\nexit 3\n").unwrap();

        match Pandoc::with_program("sh").convert(&source) {
            Err(ConversionError::Failed { status, stderr, .. }) => {
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "bad input");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_does_not_deadlock() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("big.tex");
        // well past a 64 KiB pipe buffer on both streams
        fs::write(
            &source,
            "i=0\nwhile [ $i -lt 4000 ]; do\n  echo '<p>xxxxxxxxxxxxxxxxxxxxxxxxxxxxxx</p>'\n  echo 'eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee' >&2\n  i=$((i+1))\ndone\n",
        )
        .unwrap();

        let html = Pandoc::with_program("sh").convert(&source).unwrap();
        assert_eq!(html.lines().count(), 4000);
    }
}
