//! Package renderer: minimal WordprocessingML (DOCX) package
//!
//! Writes only the three parts Word needs to open a document. Every zip
//! entry carries the same fixed timestamp, so identical models produce
//! byte-identical packages.

use crate::config::GenerationConfig;
use crate::error::{Result, ResumeAtsError};
use crate::output::generator::SectionRenderer;
use crate::output::sections::{LineStyle, Section};
use quick_xml::escape::escape;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Skills are bullet separated in the DOCX
pub const SKILL_DELIMITER: &str = " \u{2022} ";

const FONT: &str = "Arial";
const TWIPS_PER_MM: f32 = 1440.0 / 25.4;
const TWIPS_PER_PT: f32 = 20.0;

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#
);

const PACKAGE_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

const DOCUMENT_OPEN: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:body>"#
);

/// Paragraph spacing in twips
#[derive(Debug, Clone, Copy, Default)]
struct Spacing {
    before: u32,
    after: u32,
}

pub struct PackageRenderer {
    layout: GenerationConfig,
    body: String,
}

impl PackageRenderer {
    pub fn new(layout: &GenerationConfig) -> Self {
        Self {
            layout: layout.clone(),
            body: String::new(),
        }
    }

    /// Font size in half-points, as `w:sz` expects
    fn half_points(size_pt: f32) -> u32 {
        (size_pt * 2.0).round() as u32
    }

    fn run_properties(&self, style: LineStyle) -> String {
        let l = &self.layout;
        let (bold, italic, size) = match style {
            LineStyle::Title => (true, false, l.title_font_size),
            LineStyle::Heading => (true, false, l.heading_font_size),
            LineStyle::EntryTitle => (true, false, l.body_font_size),
            LineStyle::EntryDetail => (false, true, l.body_font_size),
            LineStyle::Contact | LineStyle::Body => (false, false, l.body_font_size),
        };

        let mut props = format!(r#"<w:rPr><w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#, FONT);
        if bold {
            props.push_str("<w:b/>");
        }
        if italic {
            props.push_str("<w:i/>");
        }
        props.push_str(&format!(r#"<w:sz w:val="{}"/></w:rPr>"#, Self::half_points(size)));
        props
    }

    fn push_paragraph(&mut self, text: &str, style: LineStyle, spacing: Spacing) {
        self.body.push_str("<w:p>");
        self.body.push_str(&format!(
            r#"<w:pPr><w:spacing w:before="{}" w:after="{}"/></w:pPr>"#,
            spacing.before, spacing.after
        ));
        self.body.push_str("<w:r>");
        self.body.push_str(&self.run_properties(style));

        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                self.body.push_str("<w:br/>");
            }
            self.body.push_str(r#"<w:t xml:space="preserve">"#);
            self.body.push_str(&escape(&xml_safe(line)));
            self.body.push_str("</w:t>");
        }

        self.body.push_str("</w:r></w:p>");
    }

    fn section_properties(&self) -> String {
        let l = &self.layout;
        let margin = (l.margin_pt * TWIPS_PER_PT).round() as u32;
        format!(
            concat!(
                r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/>"#,
                r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="0" w:footer="0" w:gutter="0"/>"#,
                r#"<w:cols w:space="0"/></w:sectPr>"#
            ),
            (l.page_width_mm * TWIPS_PER_MM).round() as u32,
            (l.page_height_mm * TWIPS_PER_MM).round() as u32,
            m = margin,
        )
    }
}

/// Drop characters XML 1.0 cannot carry
fn xml_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control() && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        .collect()
}

fn package_error(e: impl std::fmt::Display) -> ResumeAtsError {
    ResumeAtsError::Generation(format!("Failed to write DOCX package: {}", e))
}

impl SectionRenderer for PackageRenderer {
    fn render_section(&mut self, section: &Section) -> Result<()> {
        let lines = section.lines(SKILL_DELIMITER);
        let last = lines.len().saturating_sub(1);

        for (i, line) in lines.iter().enumerate() {
            let mut spacing = Spacing::default();
            if line.style == LineStyle::Heading {
                spacing = Spacing { before: 200, after: 100 };
            } else if i == last
                && matches!(section, Section::ExperienceEntry { .. } | Section::EducationEntry { .. })
            {
                spacing.after = 100;
            }
            self.push_paragraph(&line.text, line.style, spacing);
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut document = String::with_capacity(DOCUMENT_OPEN.len() + self.body.len() + 512);
        document.push_str(DOCUMENT_OPEN);
        document.push_str(&self.body);
        document.push_str(&self.section_properties());
        document.push_str("</w:body></w:document>");

        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in [
            ("[Content_Types].xml", CONTENT_TYPES_XML),
            ("_rels/.rels", PACKAGE_RELS_XML),
            ("word/document.xml", document.as_str()),
        ] {
            writer.start_file(name, options).map_err(package_error)?;
            writer.write_all(content.as_bytes()).map_err(package_error)?;
        }

        let cursor = writer.finish().map_err(package_error)?;
        Ok(cursor.into_inner())
    }
}
