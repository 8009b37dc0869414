//! Print renderer: single-column, paginated PDF built with printpdf
//!
//! Uses the standard Helvetica family so no font files are embedded and
//! every PDF reader (and ATS text extractor) can map the glyphs back to text.

use crate::config::GenerationConfig;
use crate::error::{Result, ResumeAtsError};
use crate::output::generator::SectionRenderer;
use crate::output::sections::{LineStyle, Section};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Skills are comma separated in the PDF
pub const SKILL_DELIMITER: &str = ", ";

// Helvetica advance widths (1/1000 em) for ASCII 0x20..=0x7E, from the AFM.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

// Helvetica-Bold runs roughly this much wider than regular.
const BOLD_WIDTH_FACTOR: f32 = 1.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontFace {
    Regular,
    Bold,
    Oblique,
}

/// Approximate rendered width of `text` in millimetres
fn text_width_mm(text: &str, face: FontFace, size_pt: f32) -> f32 {
    let units: f32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (0x20..=0x7E).contains(&code) {
                HELVETICA_WIDTHS[code - 0x20] as f32
            } else {
                556.0
            }
        })
        .sum();
    let factor = if face == FontFace::Bold { BOLD_WIDTH_FACTOR } else { 1.0 };
    units / 1000.0 * size_pt * factor * MM_PER_PT
}

/// Greedy word wrap; words wider than a full line are split by character
fn wrap_text(text: &str, face: FontFace, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width_mm(&candidate, face, size_pt) <= max_width_mm {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // The word alone may still overflow
            for c in word.chars() {
                current.push(c);
                if text_width_mm(&current, face, size_pt) > max_width_mm && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Replace characters the standard fonts cannot show
fn printable(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{2018}' | '\u{2019}' => Some('\''),
            '\u{201C}' | '\u{201D}' => Some('"'),
            '\u{2013}' | '\u{2014}' => Some('-'),
            '\u{2022}' => Some('*'),
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c if (c as u32) < 0x100 => Some(c),
            _ => Some('?'),
        })
        .collect()
}

pub struct PrintRenderer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    layout: GenerationConfig,
    /// Baseline of the last written line, millimetres from the page bottom
    cursor_mm: f32,
    pages: usize,
    written_any: bool,
}

impl PrintRenderer {
    pub fn new(layout: &GenerationConfig, title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            printable(title),
            Mm(layout.page_width_mm),
            Mm(layout.page_height_mm),
            "Page 1".to_string(),
        );

        let font = |builtin: BuiltinFont| {
            doc.add_builtin_font(builtin)
                .map_err(|e| ResumeAtsError::Generation(format!("Failed to load PDF font: {:?}", e)))
        };
        let regular = font(BuiltinFont::Helvetica)?;
        let bold = font(BuiltinFont::HelveticaBold)?;
        let oblique = font(BuiltinFont::HelveticaOblique)?;

        let layer = doc.get_page(page).get_layer(layer);
        let cursor_mm = layout.page_height_mm - margin_mm(layout);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            oblique,
            layout: layout.clone(),
            cursor_mm,
            pages: 1,
            written_any: false,
        })
    }

    fn style_metrics(&self, style: LineStyle) -> (FontFace, f32) {
        let l = &self.layout;
        match style {
            LineStyle::Title => (FontFace::Bold, l.title_font_size),
            LineStyle::Heading => (FontFace::Bold, l.heading_font_size),
            LineStyle::EntryTitle => (FontFace::Bold, l.body_font_size),
            LineStyle::EntryDetail => (FontFace::Oblique, l.body_font_size),
            LineStyle::Contact | LineStyle::Body => (FontFace::Regular, l.body_font_size),
        }
    }

    fn font(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Oblique => &self.oblique,
        }
    }

    fn body_line_mm(&self) -> f32 {
        self.layout.body_font_size * self.layout.line_spacing * MM_PER_PT
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(self.layout.page_width_mm),
            Mm(self.layout.page_height_mm),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_mm = self.layout.page_height_mm - margin_mm(&self.layout);
    }

    /// Vertical gap, dropped at the top of a page
    fn skip(&mut self, gap_mm: f32) {
        if self.cursor_mm < self.layout.page_height_mm - margin_mm(&self.layout) {
            self.cursor_mm -= gap_mm;
        }
    }

    fn write_line(&mut self, text: &str, face: FontFace, size_pt: f32) {
        let line_mm = size_pt * self.layout.line_spacing * MM_PER_PT;
        if self.cursor_mm - line_mm < margin_mm(&self.layout) {
            self.new_page();
        }
        self.cursor_mm -= line_mm;

        let x = Mm(margin_mm(&self.layout));
        let y = Mm(self.cursor_mm);
        self.layer.use_text(text, size_pt, x, y, self.font(face));
        self.written_any = true;
    }
}

fn margin_mm(layout: &GenerationConfig) -> f32 {
    layout.margin_pt * MM_PER_PT
}

impl SectionRenderer for PrintRenderer {
    fn render_section(&mut self, section: &Section) -> Result<()> {
        if section.starts_group() && self.written_any {
            self.skip(self.body_line_mm() * 0.5);
        }

        let max_width_mm = self.layout.page_width_mm - 2.0 * margin_mm(&self.layout);
        for line in section.lines(SKILL_DELIMITER) {
            let (face, size) = self.style_metrics(line.style);
            for wrapped in wrap_text(&printable(&line.text), face, size, max_width_mm) {
                self.write_line(&wrapped, face, size);
            }
        }

        if matches!(section, Section::ExperienceEntry { .. } | Section::EducationEntry { .. }) {
            self.skip(self.body_line_mm() * 0.3);
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ResumeAtsError::Generation(format!("Failed to write PDF: {:?}", e)))
    }
}
