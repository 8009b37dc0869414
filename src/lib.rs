//! Resume ATS library: document text extraction, skill matching and
//! ATS-friendly resume generation

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeAtsError};
pub use input::{DocumentFormat, DocumentParser, InputManager, RawDocument};
pub use output::{DocumentGenerator, GeneratedDocument, OutputTarget, ResumeModel};
pub use processing::{compare, ComparisonResult, NormalizedText, SkillExtractor, SkillSet};
