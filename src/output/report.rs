//! Comparison report: skill match plus the context the formatters print

use crate::processing::comparator::ComparisonResult;
use crate::processing::skills::{SkillCategory, SkillDictionary, SkillSet};
use crate::processing::text_processor::{detect_experience_level, ExperienceLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub metadata: ReportMetadata,
    pub comparison: ComparisonResult,
    /// Seniority asked for by the job description
    pub job_experience_level: ExperienceLevel,
    pub matched_by_category: Vec<CategoryBreakdown>,
    pub missing_by_category: Vec<CategoryBreakdown>,
    pub verdict: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub resume_file: String,
    pub job_file: String,
    pub generated_at: DateTime<Utc>,
    pub resume_skill_count: usize,
    pub job_skill_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: SkillCategory,
    pub skills: Vec<String>,
}

/// Inputs a report is assembled from
pub struct ReportInputs<'a> {
    pub resume_file: &'a str,
    pub job_file: &'a str,
    pub job_text: &'a str,
    pub resume_skill_count: usize,
    pub job_skill_count: usize,
}

impl ComparisonReport {
    pub fn build(inputs: ReportInputs<'_>, comparison: ComparisonResult, dictionary: &SkillDictionary) -> Self {
        let breakdown = |set: &SkillSet| {
            set.by_category(dictionary)
                .into_iter()
                .map(|(category, skills)| CategoryBreakdown { category, skills })
                .collect::<Vec<_>>()
        };

        let matched_by_category = breakdown(&comparison.matched_skills);
        let missing_by_category = breakdown(&comparison.missing_skills);
        let verdict = verdict(&comparison);

        Self {
            metadata: ReportMetadata {
                resume_file: inputs.resume_file.to_string(),
                job_file: inputs.job_file.to_string(),
                generated_at: Utc::now(),
                resume_skill_count: inputs.resume_skill_count,
                job_skill_count: inputs.job_skill_count,
            },
            job_experience_level: detect_experience_level(inputs.job_text),
            comparison,
            matched_by_category,
            missing_by_category,
            verdict,
        }
    }

    pub fn match_percentage(&self) -> u8 {
        self.comparison.match_percentage
    }
}

fn verdict(comparison: &ComparisonResult) -> String {
    if comparison.matched_skills.is_empty() && comparison.missing_skills.is_empty() {
        return "No dictionary skills found in the job description".to_string();
    }

    let summary = match comparison.match_percentage {
        80..=100 => "Strong match",
        60..=79 => "Good match",
        40..=59 => "Partial match",
        _ => "Weak match",
    };

    if comparison.missing_skills.is_empty() {
        format!("{}: every listed skill is covered", summary)
    } else {
        format!(
            "{}: {} of {} job skills missing",
            summary,
            comparison.missing_skills.len(),
            comparison.matched_skills.len() + comparison.missing_skills.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::comparator::compare;

    fn inputs<'a>(job_text: &'a str) -> ReportInputs<'a> {
        ReportInputs {
            resume_file: "cv.pdf",
            job_file: "jd.txt",
            job_text,
            resume_skill_count: 3,
            job_skill_count: 3,
        }
    }

    #[test]
    fn test_report_groups_by_category() {
        let resume: SkillSet = ["python", "docker", "aws"].into_iter().collect();
        let job: SkillSet = ["python", "aws", "postgresql"].into_iter().collect();
        let report = ComparisonReport::build(
            inputs("Senior backend engineer"),
            compare(&resume, &job),
            SkillDictionary::builtin(),
        );

        assert_eq!(report.match_percentage(), 67);
        assert_eq!(report.job_experience_level, ExperienceLevel::Senior);
        assert_eq!(
            report.missing_by_category,
            vec![CategoryBreakdown {
                category: SkillCategory::Database,
                skills: vec!["postgresql".to_string()],
            }]
        );
        assert_eq!(report.matched_by_category.len(), 2);
        assert_eq!(report.verdict, "Good match: 1 of 3 job skills missing");
    }

    #[test]
    fn test_verdict_without_job_skills() {
        let report = ComparisonReport::build(
            inputs("We value curiosity"),
            compare(&SkillSet::new(), &SkillSet::new()),
            SkillDictionary::builtin(),
        );
        assert_eq!(report.match_percentage(), 0);
        assert_eq!(report.job_experience_level, ExperienceLevel::Unknown);
        assert!(report.verdict.starts_with("No dictionary skills"));
    }

    #[test]
    fn test_full_coverage_verdict() {
        let skills: SkillSet = ["rust"].into_iter().collect();
        let report = ComparisonReport::build(inputs(""), compare(&skills, &skills), SkillDictionary::builtin());
        assert_eq!(report.verdict, "Strong match: every listed skill is covered");
    }
}
