//! Set-based comparison of resume skills against job description skills

use crate::error::{Result, ResumeAtsError};
use crate::processing::skills::{SkillExtractor, SkillSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Resume skills also required by the job, in resume order
    pub matched_skills: SkillSet,
    /// Job skills absent from the resume, in job order
    pub missing_skills: SkillSet,
    /// 0-100, nearest-integer rounding; 0 when the job lists no skills
    pub match_percentage: u8,
}

/// Compare two skill sets
pub fn compare(resume_skills: &SkillSet, jd_skills: &SkillSet) -> ComparisonResult {
    let matched_skills: SkillSet = resume_skills
        .iter()
        .filter(|skill| jd_skills.contains(skill))
        .collect();

    let missing_skills: SkillSet = jd_skills
        .iter()
        .filter(|skill| !resume_skills.contains(skill))
        .collect();

    let match_percentage = match_percentage(matched_skills.len(), jd_skills.len());

    ComparisonResult {
        matched_skills,
        missing_skills,
        match_percentage,
    }
}

fn match_percentage(matched: usize, required: usize) -> u8 {
    if required == 0 {
        return 0;
    }
    let ratio = matched as f64 / required as f64 * 100.0;
    ratio.round().clamp(0.0, 100.0) as u8
}

/// Compares raw resume and job description text using one extractor
#[derive(Debug, Clone, Copy)]
pub struct SkillComparator<'d> {
    extractor: SkillExtractor<'d>,
}

impl Default for SkillComparator<'static> {
    fn default() -> Self {
        Self::new(SkillExtractor::default())
    }
}

impl<'d> SkillComparator<'d> {
    pub fn new(extractor: SkillExtractor<'d>) -> Self {
        Self { extractor }
    }

    pub fn compare(&self, resume_skills: &SkillSet, jd_skills: &SkillSet) -> ComparisonResult {
        compare(resume_skills, jd_skills)
    }

    /// Extract the resume and job skill sets.
    ///
    /// Both texts are required; an empty string is a validation failure rather
    /// than an empty comparison.
    pub fn extract_both(&self, resume_text: &str, jd_text: &str) -> Result<(SkillSet, SkillSet)> {
        if resume_text.trim().is_empty() {
            return Err(ResumeAtsError::Validation("Resume text is required".to_string()));
        }
        if jd_text.trim().is_empty() {
            return Err(ResumeAtsError::Validation("Job description is required".to_string()));
        }

        let resume_skills = self.extractor.extract_skills(resume_text);
        let jd_skills = self.extractor.extract_skills(jd_text);
        log::debug!(
            "Extracted {} resume skills and {} job skills",
            resume_skills.len(),
            jd_skills.len()
        );

        Ok((resume_skills, jd_skills))
    }

    /// Extract skills from both texts and compare them
    pub fn compare_texts(&self, resume_text: &str, jd_text: &str) -> Result<ComparisonResult> {
        let (resume_skills, jd_skills) = self.extract_both(resume_text, jd_text)?;
        Ok(compare(&resume_skills, &jd_skills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> SkillSet {
        tokens.iter().copied().collect()
    }

    #[test]
    fn test_compare_basic() {
        let result = compare(&set(&["python", "aws"]), &set(&["python", "docker", "aws"]));

        assert_eq!(result.matched_skills, set(&["python", "aws"]));
        assert_eq!(result.missing_skills, set(&["docker"]));
        assert_eq!(result.match_percentage, 67);
    }

    #[test]
    fn test_matched_follows_resume_order() {
        let result = compare(&set(&["aws", "rust", "python"]), &set(&["python", "aws"]));
        assert_eq!(result.matched_skills, set(&["aws", "python"]));
        assert_eq!(result.match_percentage, 100);
    }

    #[test]
    fn test_case_insensitive_membership() {
        let result = compare(&set(&["Python"]), &set(&["python", "go"]));
        assert_eq!(result.matched_skills, set(&["Python"]));
        assert_eq!(result.missing_skills, set(&["go"]));
        assert_eq!(result.match_percentage, 50);
    }

    #[test]
    fn test_zero_job_skills() {
        assert_eq!(compare(&set(&["python"]), &set(&[])).match_percentage, 0);
        assert_eq!(compare(&set(&[]), &set(&[])).match_percentage, 0);
    }

    #[test]
    fn test_empty_resume() {
        let result = compare(&set(&[]), &set(&["python", "sql server"]));
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.missing_skills.len(), 2);
        assert_eq!(result.match_percentage, 0);
    }

    #[test]
    fn test_rounding_is_nearest() {
        assert_eq!(match_percentage(1, 3), 33);
        assert_eq!(match_percentage(2, 3), 67);
        assert_eq!(match_percentage(1, 8), 13);
        assert_eq!(match_percentage(1, 200), 1);
    }

    #[test]
    fn test_compare_texts() {
        let comparator = SkillComparator::default();
        let result = comparator
            .compare_texts(
                "Python developer with AWS experience",
                "Looking for Python, Docker and AWS skills",
            )
            .unwrap();

        assert_eq!(result.matched_skills, set(&["python", "aws"]));
        assert_eq!(result.missing_skills, set(&["docker"]));
        assert_eq!(result.match_percentage, 67);
    }

    #[test]
    fn test_compare_texts_requires_both() {
        let comparator = SkillComparator::default();
        assert!(matches!(
            comparator.compare_texts("", "python"),
            Err(ResumeAtsError::Validation(_))
        ));
        assert!(matches!(
            comparator.compare_texts("python", "  \n"),
            Err(ResumeAtsError::Validation(_))
        ));
    }

    #[test]
    fn test_extract_both_rejects_blank_resume() {
        let comparator = SkillComparator::default();
        let err = comparator.extract_both(" ", "Python and AWS").unwrap_err();
        assert!(matches!(err, ResumeAtsError::Validation(_)));
        assert!(err.to_string().contains("Resume text"));

        let (resume, job) = comparator.extract_both("Rust", "Rust and Go").unwrap();
        assert_eq!(resume, set(&["rust"]));
        assert_eq!(job, set(&["go", "rust"]));
    }

    #[test]
    fn test_serialized_field_names() {
        let result = compare(&set(&["python"]), &set(&["python"]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["matched_skills"][0], "python");
        assert_eq!(json["missing_skills"].as_array().unwrap().len(), 0);
        assert_eq!(json["match_percentage"], 100);
    }
}
