//! Text extraction from various file formats

use crate::error::{Result, ResumeAtsError};
use log::{debug, warn};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};

/// Pulls raw (not yet normalized) text out of an in-memory file
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs instead of returning an error
        let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

        match outcome {
            Ok(Ok(text)) => {
                debug!("Extracted {} characters from PDF", text.len());
                Ok(text)
            }
            Ok(Err(e)) => Err(ResumeAtsError::Parse(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<String>()
                    .map(String::as_str)
                    .or_else(|| panic.downcast_ref::<&str>().copied())
                    .unwrap_or("decoder aborted");
                warn!("PDF decoder panicked: {}", reason);
                Err(ResumeAtsError::Parse(format!(
                    "Failed to extract text from PDF: {}",
                    reason
                )))
            }
        }
    }
}

/// Reads the body part of a WordprocessingML package
pub struct DocxExtractor;

const DOCX_BODY_PART: &str = "word/document.xml";

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut xml = String::new();
        archive
            .by_name(DOCX_BODY_PART)
            .map_err(|e| ResumeAtsError::Parse(format!("DOCX has no {}: {}", DOCX_BODY_PART, e)))?
            .read_to_string(&mut xml)
            .map_err(|e| ResumeAtsError::Parse(format!("Failed to read {}: {}", DOCX_BODY_PART, e)))?;

        let text = body_text(&xml)?;
        debug!("Extracted {} characters from DOCX", text.len());
        Ok(text)
    }
}

/// Text runs of `<w:body>`, one line per paragraph
fn body_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_body = false;
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"body" => in_body = true,
                b"t" => in_run_text = in_body,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"body" => in_body = false,
                b"t" => in_run_text = false,
                b"p" if in_body => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) if in_body => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::CData(t) if in_run_text => text.push_str(&String::from_utf8_lossy(&t)),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ResumeAtsError::Parse(format!("Text file is not valid UTF-8: {}", e)))
    }
}

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n");

        let clean_text = HTML_TAG.replace_all(&text, "");
        // &amp; last so "&amp;lt;" stays a literal "&lt;"
        let clean_text = clean_text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn docx_with_body(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(DOCX_BODY_PART, FileOptions::default()).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs_tabs_and_entities() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>C++</w:t><w:tab/><w:t>R&amp;D</w:t><w:br/><w:t>Node.js</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = DocxExtractor.extract(&docx_with_body(xml)).unwrap();
        assert_eq!(text, "Jane Doe\nC++\tR&D\nNode.js\n");
    }

    #[test]
    fn test_docx_ignores_non_text_elements() {
        let xml = r#"<w:document xmlns:w="x"><w:body><w:p><w:r><w:instrText>PAGE</w:instrText><w:t>Visible</w:t></w:r></w:p></w:body></w:document>"#;
        let text = DocxExtractor.extract(&docx_with_body(xml)).unwrap();
        assert_eq!(text, "Visible\n");
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        let err = DocxExtractor.extract(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ResumeAtsError::Parse(_)));
    }

    #[test]
    fn test_docx_requires_body_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/styles.xml", FileOptions::default()).unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = DocxExtractor.extract(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }

    #[test]
    fn test_docx_malformed_xml() {
        let bytes = docx_with_body("<w:document><w:body><w:p></w:body>");
        assert!(matches!(DocxExtractor.extract(&bytes), Err(ResumeAtsError::Parse(_))));
    }

    #[test]
    fn test_pdf_rejects_garbage() {
        let err = PdfExtractor.extract(b"%PDF-1.4 garbage without xref").unwrap_err();
        assert!(matches!(err, ResumeAtsError::Parse(_)));

        let err = PdfExtractor.extract(&[]).unwrap_err();
        assert!(matches!(err, ResumeAtsError::Parse(_)));
    }

    #[test]
    fn test_markdown_strips_formatting() {
        let md = "# John Doe\n\n**Software Engineer** with *React* & Node.js\n\n- Rust\n- Go\n";
        let text = MarkdownExtractor.extract(md.as_bytes()).unwrap();

        assert!(text.contains("John Doe"));
        assert!(text.contains("Software Engineer with React & Node.js"));
        assert!(text.contains("Rust"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_plain_text_requires_utf8() {
        assert_eq!(PlainTextExtractor.extract(b"hello").unwrap(), "hello");
        assert!(PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).is_err());
    }
}
