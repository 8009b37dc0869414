//! Text normalization and lightweight text classification

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Text with every whitespace run collapsed to a single space and both ends trimmed.
///
/// The only way to build one is through [`NormalizedText::new`], so holding a
/// `NormalizedText` guarantees the invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        Self(normalize_whitespace(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NormalizedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl<'de> Deserialize<'de> for NormalizedText {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

/// Normalize whitespace (collapse runs including newlines and tabs, trim ends)
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Seniority signalled by job titles in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Executive,
    Senior,
    MidLevel,
    Junior,
    Unknown,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExperienceLevel::Executive => "executive",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::MidLevel => "mid-level",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

// Checked top to bottom, first hit wins.
static LEVEL_PATTERNS: Lazy<Vec<(ExperienceLevel, Regex)>> = Lazy::new(|| {
    [
        (ExperienceLevel::Executive, r"\b(cto|cfo|ceo|chief|director|principal)\b"),
        (ExperienceLevel::Senior, r"\b(senior|lead|staff|architect)\b"),
        (ExperienceLevel::MidLevel, r"\b(mid|intermediate|mid-level)\b"),
        (ExperienceLevel::Junior, r"\b(junior|entry|entry-level|graduate|intern)\b"),
    ]
    .into_iter()
    .map(|(level, pattern)| (level, Regex::new(pattern).expect("Invalid experience level regex")))
    .collect()
});

/// Detect the highest seniority keyword present in the text
pub fn detect_experience_level(text: &str) -> ExperienceLevel {
    let lower = text.to_lowercase();

    LEVEL_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lower))
        .map(|(level, _)| *level)
        .unwrap_or(ExperienceLevel::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        let text = "  John Doe\n\n\tSoftware   Engineer \r\n Rust  ";
        assert_eq!(normalize_whitespace(text), "John Doe Software Engineer Rust");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\t "), "");
        assert!(NormalizedText::new("\n\n").is_empty());
    }

    #[test]
    fn test_normalize_unicode_whitespace() {
        assert_eq!(normalize_whitespace("a\u{00A0}\u{2003}b"), "a b");
    }

    #[test]
    fn test_normalized_text_deserialize_normalizes() {
        let text: NormalizedText = serde_json::from_str("\"  a \\n b \"").unwrap();
        assert_eq!(text.as_str(), "a b");
    }

    #[test]
    fn test_experience_levels() {
        assert_eq!(detect_experience_level("Director of Engineering"), ExperienceLevel::Executive);
        assert_eq!(detect_experience_level("Senior Rust Developer"), ExperienceLevel::Senior);
        assert_eq!(detect_experience_level("Mid-level backend role"), ExperienceLevel::MidLevel);
        assert_eq!(detect_experience_level("Graduate programme"), ExperienceLevel::Junior);
        assert_eq!(detect_experience_level("Backend developer"), ExperienceLevel::Unknown);
    }

    #[test]
    fn test_experience_level_priority_and_boundaries() {
        // Executive beats senior when both appear
        assert_eq!(
            detect_experience_level("Lead engineer reporting to the CTO"),
            ExperienceLevel::Executive
        );
        // "leadership" is not "lead"
        assert_eq!(detect_experience_level("leadership skills"), ExperienceLevel::Unknown);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in "\\PC*") {
            let once = normalize_whitespace(&text);
            prop_assert_eq!(normalize_whitespace(&once), once.clone());
        }

        #[test]
        fn prop_normalized_has_no_whitespace_runs(text in "[a-z \\t\\n]{0,64}") {
            let normalized = normalize_whitespace(&text);
            prop_assert!(!normalized.contains("  "));
            prop_assert!(!normalized.contains('\n'));
            prop_assert!(!normalized.contains('\t'));
            prop_assert_eq!(normalized.trim(), normalized.as_str());
        }
    }
}
