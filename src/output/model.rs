//! Structured resume model consumed by the document generator

use serde::{Deserialize, Deserializer, Serialize};

/// Every field is optional; a missing field omits its section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeModel {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub field: Option<String>,
    pub school: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub year: Option<String>,
}

impl ResumeModel {
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ExperienceEntry {
    pub fn new(title: &str, company: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            company: Some(company.to_string()),
            ..Self::default()
        }
    }
}

impl EducationEntry {
    pub fn new(degree: &str, field: &str, school: &str, year: &str) -> Self {
        Self {
            degree: Some(degree.to_string()),
            field: Some(field.to_string()),
            school: Some(school.to_string()),
            year: Some(year.to_string()),
        }
    }
}

/// Graduation years arrive both as `"2019"` and `2019`
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Year>::deserialize(deserializer)?.map(|year| match year {
        Year::Text(text) => text,
        Year::Number(number) => number.to_string(),
    }))
}

/// Trimmed value of an optional field, `None` when absent or blank
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
