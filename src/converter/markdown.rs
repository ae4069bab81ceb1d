//! In-process Markdown backend

use pulldown_cmark::{html, CowStr, Event, Options, Parser};
use std::fs;
use std::path::Path;

use super::{ConversionError, Converter};
use crate::helpers::escape_html;

/// Stand-in for a lifted `\(..\)`/`\[..\]` span while Markdown is parsed
const MATH_TOKEN: &str = "TEXPOSTMATH";

/// Markdown renderer that needs no external tool
///
/// Math leaves as `\(..\)` (inline) and `\[..\]` (display), the markers
/// `pandoc --mathjax` produces and MathJax recognises by default. Sources may
/// write math either with those delimiters or as `$..$`/`$$..$$`.
#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    options: Options,
}

impl MarkdownConverter {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_MATH,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // backslash delimiters would be eaten as escapes, so lift them out first
        let (protected, spans) = protect_math(markdown);

        let parser = Parser::new_ext(&protected, self.options).map(|event| match event {
            Event::InlineMath(tex) => Event::InlineHtml(CowStr::from(math_markup(&tex, false))),
            Event::DisplayMath(tex) => Event::InlineHtml(CowStr::from(math_markup(&tex, true))),
            other => other,
        });
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        for (i, span) in spans.iter().enumerate() {
            html_output = html_output.replace(
                &math_token(i),
                &math_markup(&span.tex, span.display),
            );
        }
        html_output
    }
}

/// A math span lifted out of the Markdown source
#[derive(Debug, Clone, PartialEq, Eq)]
struct MathSpan {
    tex: String,
    display: bool,
}

fn math_token(index: usize) -> String {
    // trailing X keeps token 1 from matching inside token 10
    format!("{}{}X", MATH_TOKEN, index)
}

fn math_markup(tex: &str, display: bool) -> String {
    if display {
        format!("\\[{}\\]", escape_html(tex))
    } else {
        format!("\\({}\\)", escape_html(tex))
    }
}

/// Replace `\(..\)` and `\[..\]` outside code with tokens
fn protect_math(markdown: &str) -> (String, Vec<MathSpan>) {
    let mut out = String::with_capacity(markdown.len());
    let mut spans = Vec::new();
    let mut prose = String::new();
    let mut fence: Option<String> = None;

    for line in markdown.split_inclusive('\n') {
        let marker = fence_marker(line);
        match (&fence, marker) {
            (None, Some(marker)) => {
                protect_prose(&prose, &mut out, &mut spans);
                prose.clear();
                fence = Some(marker);
                out.push_str(line);
            }
            (Some(open), Some(marker)) if marker.starts_with(open.as_str()) => {
                fence = None;
                out.push_str(line);
            }
            (Some(_), _) => out.push_str(line),
            (None, None) => prose.push_str(line),
        }
    }

    protect_prose(&prose, &mut out, &mut spans);
    (out, spans)
}

/// Run of three or more backticks or tildes opening a fenced code line
fn fence_marker(line: &str) -> Option<String> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let fence_char = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let run: String = trimmed.chars().take_while(|c| *c == fence_char).collect();
    (run.len() >= 3).then_some(run)
}

fn protect_prose(text: &str, out: &mut String, spans: &mut Vec<MathSpan>) {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut last = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'`' => {
                let run = bytes[i..].iter().take_while(|b| **b == b'`').count();
                i = closing_backticks(bytes, i + run, run).unwrap_or(i + run);
            }
            b'\\' if i + 1 < bytes.len() => {
                let (close, display) = match bytes[i + 1] {
                    b'(' => ("\\)", false),
                    b'[' => ("\\]", true),
                    _ => {
                        i += 2;
                        continue;
                    }
                };
                match text[i + 2..].find(close) {
                    Some(len) => {
                        out.push_str(&text[last..i]);
                        out.push_str(&math_token(spans.len()));
                        spans.push(MathSpan {
                            tex: text[i + 2..i + 2 + len].to_string(),
                            display,
                        });
                        i += 2 + len + 2;
                        last = i;
                    }
                    None => i += 2,
                }
            }
            _ => i += 1,
        }
    }

    out.push_str(&text[last..]);
}

/// End of the next run of exactly `len` backticks at or after `from`
fn closing_backticks(bytes: &[u8], from: usize, len: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'`' {
                i += 1;
            }
            if i - start == len {
                return Some(i);
            }
        } else {
            i += 1;
        }
    }
    None
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for MarkdownConverter {
    fn convert(&self, source: &Path) -> Result<String, ConversionError> {
        let markdown = fs::read_to_string(source).map_err(|e| ConversionError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        Ok(self.render(&markdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownConverter::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_table() {
        let renderer = MarkdownConverter::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_math_markers_survive() {
        let renderer = MarkdownConverter::new();
        let html = renderer
            .render("Inline \\(a_1 + b_2\\) and $x_1 * y_2$ and\n\n\\[ E = mc^2 \\]\n");
        assert!(html.contains(r"\(a_1 + b_2\)"), "{}", html);
        assert!(html.contains(r"\(x_1 * y_2\)"), "{}", html);
        assert!(html.contains(r"\[ E = mc^2 \]"), "{}", html);
        assert!(!html.contains(MATH_TOKEN));
    }

    #[test]
    fn test_multiline_display_math() {
        let html = MarkdownConverter::new().render("Energy:\n\n\\[\nE = mc^2\n\\]\n");
        assert!(html.contains("\\[\nE = mc^2\n\\]"), "{}", html);
    }

    #[test]
    fn test_math_is_html_escaped() {
        let html = MarkdownConverter::new().render(r"when \(a < b\)");
        assert!(html.contains(r"\(a &lt; b\)"), "{}", html);
    }

    #[test]
    fn test_code_is_left_alone() {
        let renderer = MarkdownConverter::new();
        let html = renderer.render("use `\\(x\\)` here\n\n```\n\\[y\\]\n```\n");
        assert!(html.contains(r"<code>\(x\)</code>"), "{}", html);
        assert!(html.contains(r"\[y\]"), "{}", html);
        assert!(!html.contains(MATH_TOKEN));
    }

    #[test]
    fn test_escaped_backslash_is_not_math() {
        let (protected, spans) = protect_math(r"a \\(b) c");
        assert_eq!(protected, r"a \\(b) c");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_convert_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2024-01-01-a.md");
        fs::write(&path, "hi").unwrap();
        let html = MarkdownConverter::new().convert(&path).unwrap();
        assert_eq!(html.trim(), "<p>hi</p>");
    }

    #[test]
    fn test_convert_missing_file() {
        let err = MarkdownConverter::new()
            .convert(Path::new("/nonexistent/a.md"))
            .unwrap_err();
        assert!(matches!(err, ConversionError::Io { .. }));
    }
}
