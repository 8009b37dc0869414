//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{Result, ResumeAtsError};
use crate::input::document::{DocumentParser, RawDocument};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::text_processor::NormalizedText;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Reads files from disk, enforces the upload size limit and routes them to
/// the right extractor
pub struct InputManager {
    parser: DocumentParser,
    max_file_size_bytes: u64,
    cache: HashMap<String, NormalizedText>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl InputManager {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            parser: DocumentParser::new(),
            max_file_size_bytes: config.max_file_size_bytes,
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a PDF or DOCX upload without parsing it
    pub async fn read_document(&self, path: &Path) -> Result<RawDocument> {
        let bytes = self.read_bounded(path).await?;
        let filename = path.to_string_lossy();
        RawDocument::from_filename(bytes, &filename)
    }

    /// Extract normalized text from a resume or job description file
    pub async fn extract_text(&mut self, path: &Path) -> Result<NormalizedText> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf | FileType::Docx => {
                let raw = self.read_document(path).await?;
                self.parser.extract_text(&raw)?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                let bytes = self.read_bounded(path).await?;
                NormalizedText::new(&PlainTextExtractor.extract(&bytes)?)
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                let bytes = self.read_bounded(path).await?;
                NormalizedText::new(&MarkdownExtractor.extract(&bytes)?)
            }
            FileType::Unknown => {
                return Err(ResumeAtsError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    async fn read_bounded(&self, path: &Path) -> Result<Vec<u8>> {
        let metadata = fs::metadata(path).await.map_err(|_| {
            ResumeAtsError::Validation(format!("File does not exist: {}", path.display()))
        })?;

        if !metadata.is_file() {
            return Err(ResumeAtsError::Validation(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }
        if metadata.len() > self.max_file_size_bytes {
            return Err(ResumeAtsError::Validation(format!(
                "{} is {} bytes, above the {} byte limit",
                path.display(),
                metadata.len(),
                self.max_file_size_bytes
            )));
        }

        Ok(fs::read(path).await?)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
