//! Ordered section descriptors shared by every output renderer

use crate::error::{Result, ResumeAtsError};
use crate::output::model::{present, EducationEntry, ExperienceEntry, ResumeModel};

pub const SUMMARY_HEADING: &str = "PROFESSIONAL SUMMARY";
pub const SKILLS_HEADING: &str = "SKILLS";
pub const EXPERIENCE_HEADING: &str = "PROFESSIONAL EXPERIENCE";
pub const EDUCATION_HEADING: &str = "EDUCATION";

pub const CONTACT_SEPARATOR: &str = " | ";

/// One block of the single-column resume layout
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Header { name: String },
    Contact { line: String },
    Heading { title: &'static str },
    Summary { text: String },
    Skills { skills: Vec<String> },
    ExperienceEntry {
        headline: String,
        duration: Option<String>,
        description: Option<String>,
    },
    EducationEntry {
        qualification: String,
        institution: String,
    },
}

/// How a renderer should present a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Contact,
    Heading,
    Body,
    EntryTitle,
    EntryDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    pub style: LineStyle,
}

impl StyledLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl Section {
    /// Lines of this section; renderers differ only in how skills are joined
    pub fn lines(&self, skill_delimiter: &str) -> Vec<StyledLine> {
        match self {
            Section::Header { name } => vec![StyledLine::new(name.as_str(), LineStyle::Title)],
            Section::Contact { line } => vec![StyledLine::new(line.as_str(), LineStyle::Contact)],
            Section::Heading { title } => vec![StyledLine::new(*title, LineStyle::Heading)],
            Section::Summary { text } => vec![StyledLine::new(text.as_str(), LineStyle::Body)],
            Section::Skills { skills } => {
                vec![StyledLine::new(skills.join(skill_delimiter), LineStyle::Body)]
            }
            Section::ExperienceEntry {
                headline,
                duration,
                description,
            } => {
                let mut lines = vec![StyledLine::new(headline.as_str(), LineStyle::EntryTitle)];
                if let Some(duration) = duration {
                    lines.push(StyledLine::new(duration.as_str(), LineStyle::EntryDetail));
                }
                if let Some(description) = description {
                    lines.push(StyledLine::new(description.as_str(), LineStyle::Body));
                }
                lines
            }
            Section::EducationEntry {
                qualification,
                institution,
            } => [
                StyledLine::new(qualification.as_str(), LineStyle::EntryTitle),
                StyledLine::new(institution.as_str(), LineStyle::Body),
            ]
            .into_iter()
            .filter(|line| !line.text.is_empty())
            .collect(),
        }
    }

    /// Whether extra space belongs above this section
    pub fn starts_group(&self) -> bool {
        matches!(self, Section::Heading { .. })
    }
}

/// Turn a resume model into its ordered section list.
///
/// Absent or blank fields drop their section; an entry with neither of its
/// identifying fields cannot be rendered and fails.
pub fn plan_sections(model: &ResumeModel) -> Result<Vec<Section>> {
    let mut sections = Vec::new();

    if let Some(name) = present(&model.name) {
        sections.push(Section::Header { name: name.to_string() });
    }

    let contact: Vec<&str> = [present(&model.email), present(&model.phone)]
        .into_iter()
        .flatten()
        .collect();
    if !contact.is_empty() {
        sections.push(Section::Contact {
            line: contact.join(CONTACT_SEPARATOR),
        });
    }

    if let Some(summary) = present(&model.summary) {
        sections.push(Section::Heading { title: SUMMARY_HEADING });
        sections.push(Section::Summary { text: summary.to_string() });
    }

    let skills: Vec<String> = model
        .skills
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if !skills.is_empty() {
        sections.push(Section::Heading { title: SKILLS_HEADING });
        sections.push(Section::Skills { skills });
    }

    if let Some(entries) = model.experience.as_ref().filter(|e| !e.is_empty()) {
        sections.push(Section::Heading { title: EXPERIENCE_HEADING });
        for (index, entry) in entries.iter().enumerate() {
            sections.push(experience_section(index, entry)?);
        }
    }

    if let Some(entries) = model.education.as_ref().filter(|e| !e.is_empty()) {
        sections.push(Section::Heading { title: EDUCATION_HEADING });
        for (index, entry) in entries.iter().enumerate() {
            sections.push(education_section(index, entry)?);
        }
    }

    Ok(sections)
}

fn experience_section(index: usize, entry: &ExperienceEntry) -> Result<Section> {
    let headline = joined(present(&entry.title), " at ", present(&entry.company)).ok_or_else(|| {
        ResumeAtsError::Generation(format!(
            "experience entry {} needs a title or a company",
            index + 1
        ))
    })?;

    Ok(Section::ExperienceEntry {
        headline,
        duration: present(&entry.duration).map(str::to_string),
        description: present(&entry.description).map(str::to_string),
    })
}

fn education_section(index: usize, entry: &EducationEntry) -> Result<Section> {
    let degree = present(&entry.degree);
    let school = present(&entry.school);
    if degree.is_none() && school.is_none() {
        return Err(ResumeAtsError::Generation(format!(
            "education entry {} needs a degree or a school",
            index + 1
        )));
    }

    Ok(Section::EducationEntry {
        qualification: joined(degree, " in ", present(&entry.field)).unwrap_or_default(),
        institution: joined(school, ", ", present(&entry.year)).unwrap_or_default(),
    })
}

/// "left SEP right", or whichever side exists
fn joined(left: Option<&str>, separator: &str, right: Option<&str>) -> Option<String> {
    match (left, right) {
        (Some(l), Some(r)) => Some(format!("{}{}{}", l, separator, r)),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}
