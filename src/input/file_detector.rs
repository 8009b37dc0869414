//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Binary formats go through the document parser, the rest are read as text
    pub fn is_binary_document(&self) -> bool {
        matches!(self, FileType::Pdf | FileType::Docx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("jd.markdown")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("resume")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("cv.doc")), FileType::Unknown);
        assert!(FileType::Docx.is_binary_document());
        assert!(!FileType::Text.is_binary_document());
    }
}
