//! Integration tests for the resume ATS toolkit

use resume_ats::config::InputConfig;
use resume_ats::output::{EducationEntry, ExperienceEntry};
use resume_ats::processing::{SkillComparator, SkillExtractor};
use resume_ats::{
    DocumentFormat, DocumentGenerator, DocumentParser, InputManager, OutputTarget, RawDocument,
    ResumeAtsError, ResumeModel,
};
use std::path::Path;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn full_model() -> ResumeModel {
    let mut experience = ExperienceEntry::new("Backend Engineer", "Acme");
    experience.duration = Some("2020 - 2023".to_string());
    experience.description = Some("Built data pipelines in Python on AWS Lambda".to_string());

    ResumeModel {
        name: Some("Jane Doe".to_string()),
        email: Some("jane@example.com".to_string()),
        phone: Some("555-0100".to_string()),
        summary: Some("Engineer focused on reliable services".to_string()),
        skills: Some(vec!["Python".to_string(), "AWS".to_string(), "Docker".to_string()]),
        experience: Some(vec![experience]),
        education: Some(vec![EducationEntry::new("BSc", "Computer Science", "MIT", "2019")]),
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "jd.txt", b"Senior Engineer\n\n  React   and Node.js\t required");

    let mut manager = InputManager::default();
    let text = manager.extract_text(&path).await.unwrap();

    assert_eq!(text.as_str(), "Senior Engineer React and Node.js required");
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "jd.md",
        b"## John Doe\n\n**Software Engineer** working with *React*\n\n- Node.js\n- Docker\n",
    );

    let mut manager = InputManager::default();
    let text = manager.extract_text(&path).await.unwrap();

    assert!(text.as_str().contains("John Doe"));
    assert!(text.as_str().contains("Software Engineer working with React"));
    assert!(!text.as_str().contains("**"));
    assert!(!text.as_str().contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.txt", b"Python developer");

    let mut manager = InputManager::default();
    let first = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    // Served from the cache even after the file changes
    std::fs::write(&path, b"Rust developer").unwrap();
    let second = manager.extract_text(&path).await.unwrap();
    assert_eq!(first, second);

    manager.clear_cache();
    let third = manager.extract_text(&path).await.unwrap();
    assert_eq!(third.as_str(), "Rust developer");
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.xyz", b"whatever");

    let mut manager = InputManager::default();
    let err = manager.extract_text(&path).await.unwrap_err();
    assert!(matches!(err, ResumeAtsError::UnsupportedFormat(_)));

    let path = write_fixture(&dir, "resume.rtf", b"{\\rtf1}");
    let err = manager.read_document(&path).await.unwrap_err();
    assert!(matches!(err, ResumeAtsError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::default();
    let result = manager.extract_text(Path::new("/nonexistent/dir/resume.pdf")).await;
    assert!(matches!(result, Err(ResumeAtsError::Validation(_))));
}

#[tokio::test]
async fn test_size_limit_is_enforced() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.docx", &[0u8; 2048]);

    let manager = InputManager::new(&InputConfig {
        max_file_size_bytes: 1024,
    });
    let err = manager.read_document(&path).await.unwrap_err();
    assert!(matches!(err, ResumeAtsError::Validation(_)));
    assert!(err.to_string().contains("1024 byte limit"));
}

#[tokio::test]
async fn test_malformed_upload_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.pdf", b"this is not a pdf");

    let mut manager = InputManager::default();
    let err = manager.extract_text(&path).await.unwrap_err();
    assert!(matches!(err, ResumeAtsError::Parse(_)));
}

#[test]
fn test_generated_docx_round_trip() {
    let document = DocumentGenerator::default()
        .render(&full_model(), OutputTarget::Packaged)
        .unwrap();

    let raw = RawDocument::new(document.into_bytes(), DocumentFormat::Docx);
    let text = DocumentParser::new().extract_text(&raw).unwrap();

    assert!(text.as_str().starts_with("Jane Doe jane@example.com | 555-0100 PROFESSIONAL SUMMARY"));
    assert!(text.as_str().contains("Python \u{2022} AWS \u{2022} Docker"));
    assert!(text.as_str().contains("Backend Engineer at Acme 2020 - 2023"));
    assert!(text.as_str().contains("BSc in Computer Science MIT, 2019"));

    let skills = SkillExtractor::default().extract_skills(text.as_str());
    assert!(skills.contains("python"));
    assert!(skills.contains("aws"));
    assert!(skills.contains("docker"));
    assert!(skills.contains("lambda"));
}

#[test]
fn test_generated_pdf_round_trip() {
    let document = DocumentGenerator::default()
        .render(&full_model(), OutputTarget::Print)
        .unwrap();
    assert_eq!(document.content_type(), "application/pdf");

    let raw = RawDocument::from_filename(document.into_bytes(), "ats-friendly-resume.pdf").unwrap();
    let text = DocumentParser::new().extract_text(&raw).unwrap();

    assert!(text.as_str().contains("Jane Doe"));
    let skills = SkillExtractor::default().extract_skills(text.as_str());
    assert!(skills.contains("python"));
    assert!(skills.contains("aws"));
}

fn render_and_parse(model: &ResumeModel, target: OutputTarget) -> String {
    let format = match target {
        OutputTarget::Print => DocumentFormat::Pdf,
        OutputTarget::Packaged => DocumentFormat::Docx,
    };
    let document = DocumentGenerator::default().render(model, target).unwrap();
    let raw = RawDocument::new(document.into_bytes(), format);
    DocumentParser::new().extract_text(&raw).unwrap().into_string()
}

#[test]
fn test_both_targets_carry_the_same_sections() {
    let model = full_model();

    for target in [OutputTarget::Print, OutputTarget::Packaged] {
        let text = render_and_parse(&model, target);

        let mut last = 0;
        for expected in [
            "Jane Doe",
            "jane@example.com | 555-0100",
            "PROFESSIONAL SUMMARY",
            "Engineer focused on reliable services",
            "SKILLS",
            "Python",
            "PROFESSIONAL EXPERIENCE",
            "Backend Engineer at Acme",
            "2020 - 2023",
            "Built data pipelines in Python on AWS Lambda",
            "EDUCATION",
            "BSc in Computer Science",
            "MIT, 2019",
        ] {
            let offset = text[last..]
                .find(expected)
                .unwrap_or_else(|| panic!("{} output is missing {:?} after offset {}: {}", target, expected, last, text));
            last += offset + expected.len();
        }
    }
}

#[test]
fn test_name_only_model_has_no_headings() {
    let model = ResumeModel::from_json(r#"{"name": "Jane Doe"}"#).unwrap();

    for target in [OutputTarget::Print, OutputTarget::Packaged] {
        assert_eq!(render_and_parse(&model, target), "Jane Doe", "{} output", target);
    }
}

#[tokio::test]
async fn test_comparison_rejects_resume_without_text() {
    let dir = TempDir::new().unwrap();

    // An empty model renders a PDF with no text, like a scanned resume
    let blank = DocumentGenerator::default()
        .render(&ResumeModel::default(), OutputTarget::Print)
        .unwrap()
        .into_bytes();
    let resume_path = write_fixture(&dir, "scanned.pdf", &blank);
    let job_path = write_fixture(&dir, "job.txt", b"Python and AWS engineer");

    let mut manager = InputManager::default();
    let resume_text = manager.extract_text(&resume_path).await.unwrap();
    let job_text = manager.extract_text(&job_path).await.unwrap();
    assert!(resume_text.is_empty());

    let err = SkillComparator::default()
        .extract_both(resume_text.as_str(), job_text.as_str())
        .unwrap_err();
    assert!(matches!(err, ResumeAtsError::Validation(_)));
    assert!(err.to_string().contains("Resume text is required"));
}

#[test]
fn test_unrenderable_entry_fails_generation() {
    let model = ResumeModel::from_json(r#"{"name": "Jane", "experience": [{"duration": "2020"}]}"#).unwrap();
    for target in [OutputTarget::Print, OutputTarget::Packaged] {
        let err = DocumentGenerator::default().render(&model, target).unwrap_err();
        assert!(matches!(err, ResumeAtsError::Generation(_)));
    }
}

#[tokio::test]
async fn test_comparison_end_to_end() {
    let dir = TempDir::new().unwrap();

    let resume_bytes = DocumentGenerator::default()
        .render(&full_model(), OutputTarget::Packaged)
        .unwrap()
        .into_bytes();
    let resume_path = write_fixture(&dir, "resume.docx", &resume_bytes);
    let job_path = write_fixture(
        &dir,
        "job.md",
        b"# Senior Backend Engineer\n\nWe need **Python**, AWS and PostgreSQL experience.",
    );

    let mut manager = InputManager::default();
    let resume_text = manager.extract_text(&resume_path).await.unwrap();
    let job_text = manager.extract_text(&job_path).await.unwrap();

    let result = SkillComparator::default()
        .compare_texts(resume_text.as_str(), job_text.as_str())
        .unwrap();

    let matched: Vec<&str> = result.matched_skills.iter().collect();
    let missing: Vec<&str> = result.missing_skills.iter().collect();
    assert_eq!(matched, vec!["python", "aws"]);
    assert_eq!(missing, vec!["postgresql"]);
    assert_eq!(result.match_percentage, 67);
}

#[test]
fn test_comparison_requires_both_texts() {
    let comparator = SkillComparator::default();
    assert!(matches!(
        comparator.compare_texts("", "Python"),
        Err(ResumeAtsError::Validation(_))
    ));
    assert!(matches!(
        comparator.compare_texts("Python", "   "),
        Err(ResumeAtsError::Validation(_))
    ));
}
