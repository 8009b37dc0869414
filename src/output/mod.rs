//! Output: resume generation and comparison reports

pub mod model;
pub mod sections;
pub mod generator;
pub mod pdf;
pub mod docx;
pub mod report;
pub mod formatter;

pub use formatter::{save_report_to_file, ReportGenerator};
pub use generator::{DocumentGenerator, GeneratedDocument, OutputTarget};
pub use model::{EducationEntry, ExperienceEntry, ResumeModel};
pub use report::ComparisonReport;
