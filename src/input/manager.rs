//! Input manager for handling different file types

use crate::error::{RankerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::ranker::ResumeInput;
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self { cache: HashMap::new() }
    }

    /// Extract document text, flattening PDF layout. Cached per path.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(cached_text) = self.cache.get(path) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        let text = read_document(path, PdfExtractor::flattened()).await?;
        self.cache.insert(path.to_path_buf(), text.clone());

        Ok(text)
    }

    /// Load the job description. A missing file aborts the run.
    ///
    /// PDF line breaks are kept so the first line is still the job title.
    pub async fn load_job_description(&mut self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(RankerError::MissingInput(format!(
                "Job description file not found: {}",
                path.display()
            )));
        }
        read_document(path, PdfExtractor::line_preserving()).await
    }

    /// Extract a resume for ranking. Never fails: an unreadable file becomes
    /// an empty resume carrying the failure reason.
    pub async fn extract_resume(&mut self, path: &Path) -> ResumeInput {
        let id = resume_id(path);

        match self.extract_text(path).await {
            Ok(text) => ResumeInput::new(id, text),
            Err(e) => {
                warn!("Could not extract text from {}: {}", path.display(), e);
                ResumeInput::failed(id, e.to_string())
            }
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

async fn read_document(path: &Path, pdf: PdfExtractor) -> Result<String> {
    if !path.exists() {
        return Err(RankerError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    match FileType::from_path(path) {
        FileType::Pdf => {
            info!("Extracting text from PDF: {}", path.display());
            pdf.extract(path).await
        }
        FileType::Text => {
            info!("Reading plain text file: {}", path.display());
            PlainTextExtractor.extract(path).await
        }
        FileType::Markdown => {
            info!("Processing markdown file: {}", path.display());
            MarkdownExtractor.extract(path).await
        }
        FileType::Unknown => Err(RankerError::UnsupportedFormat(format!(
            "Unsupported file type for: {}",
            path.display()
        ))),
    }
}

/// Candidate identifier: the file name without its directory
pub fn resume_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Expand the given paths into the list of resume files to rank.
///
/// Files are kept as given, in order. Directories contribute their supported
/// files (non-recursive), sorted by file name.
pub fn collect_resume_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && FileType::from_path(path).is_supported())
                .collect();
            found.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

            if found.is_empty() {
                warn!("No supported resume files in {}", input.display());
            }
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }

    if paths.is_empty() {
        return Err(RankerError::MissingInput("no resumes supplied".to_string()));
    }

    Ok(paths)
}
