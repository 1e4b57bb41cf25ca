//! Text extraction from various file formats

use crate::error::{RankerError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// PDF extraction. Resumes are flattened to one line; job descriptions keep
/// one line per text line so the title stays on the first.
pub struct PdfExtractor {
    keep_line_breaks: bool,
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            RankerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;

        Ok(self.layout_text(&text))
    }
}

impl PdfExtractor {
    pub fn flattened() -> Self {
        Self { keep_line_breaks: false }
    }

    pub fn line_preserving() -> Self {
        Self { keep_line_breaks: true }
    }

    /// Trim every line and drop blank ones.
    pub fn layout_text(&self, text: &str) -> String {
        let separator = if self.keep_line_breaks { "\n" } else { " " };
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        let text = html_output
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        HTML_TAG
            .replace_all(&text, "")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
