//! CLI interface for the resume ATS toolkit

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-ats")]
#[command(about = "ATS-oriented resume parsing, skill matching and resume generation")]
#[command(long_about = "Extract text and skills from PDF/DOCX resumes, compare them against job descriptions, and generate ATS-friendly resumes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract normalized text from a PDF or DOCX resume
    Extract {
        /// Path to the document (PDF, DOCX)
        file: PathBuf,
    },

    /// List the dictionary skills found in a document
    Skills {
        /// Path to the document (PDF, DOCX, TXT, MD)
        file: PathBuf,
    },

    /// Compare resume skills with a job description
    Compare {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD, PDF, DOCX)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Generate an ATS-friendly resume from a JSON resume model
    Generate {
        /// Path to the resume model (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Target format: pdf or docx
        #[arg(short, long, default_value = "pdf")]
        format: String,

        /// Output path (defaults to the suggested filename)
        #[arg(short = 'O', long)]
        out: Option<PathBuf>,
    },

    /// Show the built-in skill dictionary
    Dictionary {
        /// Only show one category (e.g. language, database)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "generation.body_font_size")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
