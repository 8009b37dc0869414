//! Configuration management for the resume ATS toolkit

use crate::error::{Result, ResumeAtsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Upper bound on files handed to the parser
    pub max_file_size_bytes: u64,
}

/// Layout settings for generated resumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub filename_stem: String,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_pt: f32,
    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub body_font_size: f32,
    /// Line height as a multiple of the font size
    pub line_spacing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            filename_stem: "ats-friendly-resume".to_string(),
            // A4
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_pt: 40.0,
            title_font_size: 16.0,
            heading_font_size: 12.0,
            body_font_size: 11.0,
            line_spacing: 1.2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            generation: GenerationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeAtsError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAtsError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ats")
            .join("config.toml")
    }

    /// Reject layouts the print renderer cannot lay out
    pub fn validate(&self) -> Result<()> {
        let g = &self.generation;
        let margin_mm = g.margin_pt * crate::output::pdf::MM_PER_PT;

        if g.filename_stem.trim().is_empty() {
            return Err(ResumeAtsError::Configuration(
                "generation.filename_stem must not be empty".to_string(),
            ));
        }
        if g.page_width_mm <= 2.0 * margin_mm || g.page_height_mm <= 2.0 * margin_mm {
            return Err(ResumeAtsError::Configuration(
                "generation margins leave no printable area".to_string(),
            ));
        }
        for (key, value) in [
            ("title_font_size", g.title_font_size),
            ("heading_font_size", g.heading_font_size),
            ("body_font_size", g.body_font_size),
            ("line_spacing", g.line_spacing),
        ] {
            if !(value > 0.0) {
                return Err(ResumeAtsError::Configuration(format!(
                    "generation.{} must be positive, got {}",
                    key, value
                )));
            }
        }
        if self.input.max_file_size_bytes == 0 {
            return Err(ResumeAtsError::Configuration(
                "input.max_file_size_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Set a dotted key such as `generation.body_font_size`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value.parse::<T>().map_err(|_| {
                ResumeAtsError::Configuration(format!("Invalid value for {}: {}", key, value))
            })
        }

        match key {
            "input.max_file_size_bytes" => self.input.max_file_size_bytes = parse(key, value)?,
            "generation.filename_stem" => self.generation.filename_stem = value.to_string(),
            "generation.page_width_mm" => self.generation.page_width_mm = parse(key, value)?,
            "generation.page_height_mm" => self.generation.page_height_mm = parse(key, value)?,
            "generation.margin_pt" => self.generation.margin_pt = parse(key, value)?,
            "generation.title_font_size" => self.generation.title_font_size = parse(key, value)?,
            "generation.heading_font_size" => self.generation.heading_font_size = parse(key, value)?,
            "generation.body_font_size" => self.generation.body_font_size = parse(key, value)?,
            "generation.line_spacing" => self.generation.line_spacing = parse(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeAtsError::Configuration)?
            }
            "output.detailed" => self.output.detailed = parse(key, value)?,
            "output.color_output" => self.output.color_output = parse(key, value)?,
            _ => {
                return Err(ResumeAtsError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        self.validate()
    }
}
