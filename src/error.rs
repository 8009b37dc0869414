//! Error handling for the resume ATS toolkit

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAtsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse document: {0}")]
    Parse(String),

    #[error("Failed to generate document: {0}")]
    Generation(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeAtsError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeAtsError {
    fn from(err: anyhow::Error) -> Self {
        ResumeAtsError::Processing(err.to_string())
    }
}

impl From<zip::result::ZipError> for ResumeAtsError {
    fn from(err: zip::result::ZipError) -> Self {
        ResumeAtsError::Parse(format!("invalid DOCX package: {}", err))
    }
}

impl From<quick_xml::Error> for ResumeAtsError {
    fn from(err: quick_xml::Error) -> Self {
        ResumeAtsError::Parse(format!("invalid DOCX body XML: {}", err))
    }
}

impl ResumeAtsError {
    /// Short machine-readable kind, stable across message changes
    pub fn kind(&self) -> &'static str {
        match self {
            ResumeAtsError::Io(_) => "io",
            ResumeAtsError::UnsupportedFormat(_) => "unsupported_format",
            ResumeAtsError::Parse(_) => "parse",
            ResumeAtsError::Generation(_) => "generation",
            ResumeAtsError::Validation(_) => "validation",
            ResumeAtsError::Configuration(_) => "configuration",
            ResumeAtsError::Serialization(_) => "serialization",
            ResumeAtsError::Processing(_) => "processing",
            ResumeAtsError::OutputFormatting(_) => "output_formatting",
        }
    }
}
