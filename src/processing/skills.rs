//! Fixed-vocabulary skill extraction
//!
//! Skills are detected by whole-word, case-insensitive matching of each
//! dictionary token against the text. A token only counts when the characters
//! on both sides of the occurrence are non-word characters (or the text edge),
//! so `java` is never found inside `javascript`.

use crate::error::{Result, ResumeAtsError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillCategory {
    Language,
    Frontend,
    Backend,
    Database,
    CloudDevops,
    Tooling,
    DataAi,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Language,
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Database,
        SkillCategory::CloudDevops,
        SkillCategory::Tooling,
        SkillCategory::DataAi,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Language => "language",
            SkillCategory::Frontend => "frontend",
            SkillCategory::Backend => "backend",
            SkillCategory::Database => "database",
            SkillCategory::CloudDevops => "cloud-devops",
            SkillCategory::Tooling => "tooling",
            SkillCategory::DataAi => "data-ai",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkillCategory {
    type Err = ResumeAtsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace(['_', '/', ' '], "-");
        SkillCategory::ALL
            .into_iter()
            .find(|c| c.label() == wanted)
            .ok_or_else(|| {
                ResumeAtsError::Validation(format!(
                    "Unknown skill category: {}. Supported: {}",
                    s,
                    SkillCategory::ALL.map(|c| c.label()).join(", ")
                ))
            })
    }
}

const LANGUAGES: &[&str] = &[
    "javascript", "python", "java", "c++", "c#", "ruby", "php", "swift", "kotlin", "go", "rust",
    "typescript", "scala", "perl", "r", "matlab", "groovy", "dart", "elixir", "haskell",
];

const FRONTEND: &[&str] = &[
    "react", "angular", "vue", "html", "css", "sass", "less", "bootstrap", "tailwind",
    "jquery", "webpack", "gulp", "grunt", "npm", "yarn", "babel",
];

const BACKEND: &[&str] = &[
    "nodejs", "node.js", "express", "django", "flask", "spring", "laravel", "rails", "asp.net",
    "fastapi", "nest.js", "graphql", "rest api", "restful",
];

const DATABASES: &[&str] = &[
    "mongodb", "mysql", "postgresql", "oracle", "sql server", "cassandra", "redis",
    "elasticsearch", "dynamodb", "firebase", "couchdb", "sqlite",
];

const CLOUD_DEVOPS: &[&str] = &[
    "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "jenkins", "gitlab",
    "github", "circleci", "terraform", "ansible", "cloudformation", "lambda",
];

// "webpack" repeats the frontend entry; the dictionary keeps the first one.
const TOOLING: &[&str] = &[
    "git", "linux", "unix", "windows", "agile", "scrum", "jira", "confluence",
    "selenium", "junit", "pytest", "mocha", "jest", "webpack", "vite",
];

const DATA_AI: &[&str] = &[
    "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn",
    "pandas", "numpy", "spark", "hadoop", "data analysis", "nlp", "computer vision",
    "big data", "etl", "data pipeline",
];

static BUILTIN: Lazy<SkillDictionary> = Lazy::new(|| {
    SkillDictionary::from_categories([
        (SkillCategory::Language, LANGUAGES),
        (SkillCategory::Frontend, FRONTEND),
        (SkillCategory::Backend, BACKEND),
        (SkillCategory::Database, DATABASES),
        (SkillCategory::CloudDevops, CLOUD_DEVOPS),
        (SkillCategory::Tooling, TOOLING),
        (SkillCategory::DataAi, DATA_AI),
    ])
    .expect("built-in skill dictionary must compile")
});

#[derive(Debug, Clone)]
pub struct SkillEntry {
    pub token: String,
    pub category: SkillCategory,
    pattern: Regex,
}

impl SkillEntry {
    fn new(token: &str, category: SkillCategory) -> Result<Self> {
        let pattern = Regex::new(&boundary_pattern(token)).map_err(|e| {
            ResumeAtsError::Processing(format!("Invalid skill token '{}': {}", token, e))
        })?;

        Ok(Self {
            token: token.to_string(),
            category,
            pattern,
        })
    }

    /// `lower_text` must already be lower-cased
    fn occurs_in(&self, lower_text: &str) -> bool {
        self.pattern.is_match(lower_text)
    }
}

/// Build the whole-word pattern for a token, escaping regex metacharacters.
fn boundary_pattern(token: &str) -> String {
    let literal = token
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    format!(r"(?:^|\W){}(?:\W|$)", literal)
}

/// Ordered, immutable set of canonical skill tokens
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    entries: Vec<SkillEntry>,
}

impl SkillDictionary {
    /// The process-wide built-in dictionary
    pub fn builtin() -> &'static SkillDictionary {
        &BUILTIN
    }

    /// Build a dictionary from category groups, keeping first occurrences only
    pub fn from_categories<'a, I>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SkillCategory, &'a [&'a str])>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for (category, tokens) in groups {
            for token in tokens {
                let canonical = token.trim().to_lowercase();
                if canonical.is_empty() || !seen.insert(canonical.clone()) {
                    continue;
                }
                entries.push(SkillEntry::new(&canonical, category)?);
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &SkillEntry> {
        self.entries.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.token.as_str())
    }

    pub fn category_of(&self, token: &str) -> Option<SkillCategory> {
        self.entries
            .iter()
            .find(|e| e.token.eq_ignore_ascii_case(token))
            .map(|e| e.category)
    }

    pub fn in_category(&self, category: SkillCategory) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.category == category)
            .map(|e| e.token.as_str())
    }
}

/// Ordered sequence of unique skill tokens (uniqueness is case-insensitive)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless an equal token (ignoring case) is already present
    pub fn push(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.contains(&token) {
            return false;
        }
        self.0.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        let wanted = token.to_lowercase();
        self.0.iter().any(|t| t.to_lowercase() == wanted)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Group tokens by dictionary category, in category order
    pub fn by_category(&self, dictionary: &SkillDictionary) -> Vec<(SkillCategory, Vec<String>)> {
        SkillCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let tokens: Vec<String> = self
                    .iter()
                    .filter(|t| dictionary.category_of(t) == Some(category))
                    .map(str::to_string)
                    .collect();
                (!tokens.is_empty()).then_some((category, tokens))
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for token in iter {
            set.push(token);
        }
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Scans text against a borrowed skill dictionary
#[derive(Debug, Clone, Copy)]
pub struct SkillExtractor<'d> {
    dictionary: &'d SkillDictionary,
}

impl Default for SkillExtractor<'static> {
    fn default() -> Self {
        Self::new(SkillDictionary::builtin())
    }
}

impl<'d> SkillExtractor<'d> {
    pub fn new(dictionary: &'d SkillDictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &'d SkillDictionary {
        self.dictionary
    }

    /// Collect every dictionary token that occurs as a whole word, in dictionary order
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        if text.trim().is_empty() {
            return SkillSet::new();
        }

        let lower = text.to_lowercase();
        self.dictionary
            .entries
            .iter()
            .filter(|entry| entry.occurs_in(&lower))
            .map(|entry| entry.token.clone())
            .collect()
    }
}
