//! Uploaded documents and the binary-to-text parser

use crate::error::{Result, ResumeAtsError};
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, TextExtractor};
use crate::processing::text_processor::NormalizedText;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Declared format of an uploaded resume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Derive the declared format from a filename such as `CV.PDF`
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeAtsError::UnsupportedFormat(format!(
                    "{} has no file extension. Only PDF and DOCX are supported.",
                    path.display()
                ))
            })?;
        ext.parse()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentFormat {
    type Err = ResumeAtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            other => Err(ResumeAtsError::UnsupportedFormat(format!(
                "'{}'. Only PDF and DOCX are supported.",
                other
            ))),
        }
    }
}

/// Bytes of an uploaded file plus the format it claims to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    bytes: Vec<u8>,
    format: DocumentFormat,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self { bytes, format }
    }

    /// Build from a filename, failing with `UnsupportedFormat` for anything but pdf/docx
    pub fn from_filename(bytes: Vec<u8>, filename: &str) -> Result<Self> {
        let format = DocumentFormat::from_path(Path::new(filename))?;
        Ok(Self::new(bytes, format))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Extracts normalized text from PDF and DOCX uploads
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_text(&self, raw: &RawDocument) -> Result<NormalizedText> {
        info!("Extracting text from {} document ({} bytes)", raw.format(), raw.len());

        let text = match raw.format() {
            DocumentFormat::Pdf => PdfExtractor.extract(raw.bytes())?,
            DocumentFormat::Docx => DocxExtractor.extract(raw.bytes())?,
        };

        Ok(NormalizedText::new(&text))
    }
}
