//! ATS-friendly resume generation
//!
//! A [`ResumeModel`] is first planned into an ordered list of [`Section`]s.
//! The same list is then fed to one of two renderers: the print renderer
//! lays it out as a paginated PDF, the package renderer writes a DOCX
//! package. Section selection and ordering therefore live in one place.

use crate::config::GenerationConfig;
use crate::error::{Result, ResumeAtsError};
use crate::output::docx::PackageRenderer;
use crate::output::model::ResumeModel;
use crate::output::pdf::PrintRenderer;
use crate::output::sections::{plan_sections, Section};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Something that can lay out sections into a binary document
pub trait SectionRenderer {
    fn render_section(&mut self, section: &Section) -> Result<()>;

    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Paginated PDF
    Print,
    /// DOCX package
    Packaged,
}

impl OutputTarget {
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputTarget::Print => PDF_CONTENT_TYPE,
            OutputTarget::Packaged => DOCX_CONTENT_TYPE,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputTarget::Print => "pdf",
            OutputTarget::Packaged => "docx",
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputTarget {
    type Err = ResumeAtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pdf" | "print" => Ok(OutputTarget::Print),
            "docx" | "packaged" => Ok(OutputTarget::Packaged),
            _ => Err(ResumeAtsError::Validation(format!(
                "Format must be pdf or docx, got '{}'",
                s
            ))),
        }
    }
}

/// Rendered resume ready to be written or served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    bytes: Vec<u8>,
    content_type: &'static str,
    suggested_filename: String,
}

impl GeneratedDocument {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn suggested_filename(&self) -> &str {
        &self.suggested_filename
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentGenerator {
    config: GenerationConfig,
}

impl DocumentGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn render(&self, model: &ResumeModel, target: OutputTarget) -> Result<GeneratedDocument> {
        let sections = plan_sections(model)?;
        debug!("Planned {} sections for {} output", sections.len(), target);

        let bytes = match target {
            OutputTarget::Print => {
                let title = model.name.as_deref().unwrap_or("Resume");
                render_with(PrintRenderer::new(&self.config, title)?, &sections)?
            }
            OutputTarget::Packaged => render_with(PackageRenderer::new(&self.config), &sections)?,
        };

        info!("Rendered {} resume ({} bytes)", target, bytes.len());

        Ok(GeneratedDocument {
            bytes,
            content_type: target.content_type(),
            suggested_filename: format!("{}.{}", self.config.filename_stem, target.extension()),
        })
    }
}

fn render_with<R: SectionRenderer>(mut renderer: R, sections: &[Section]) -> Result<Vec<u8>> {
    for section in sections {
        renderer.render_section(section)?;
    }
    renderer.finish()
}
