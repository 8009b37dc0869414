//! resume-ats: parse resumes, match skills against job descriptions and
//! generate ATS-friendly resumes

use clap::Parser;
use log::{error, info};
use resume_ats::cli::{self, Cli, Commands, ConfigAction};
use resume_ats::input::file_detector::FileType;
use resume_ats::output::report::{ComparisonReport, ReportInputs};
use resume_ats::output::{save_report_to_file, DocumentGenerator, OutputTarget, ReportGenerator, ResumeModel};
use resume_ats::processing::{SkillCategory, SkillComparator, SkillDictionary, SkillExtractor};
use resume_ats::{Config, InputManager, Result, ResumeAtsError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Extract { file } => {
            if !FileType::from_path(&file).is_binary_document() {
                return Err(ResumeAtsError::UnsupportedFormat(format!(
                    "{}: only PDF and DOCX documents can be parsed",
                    file.display()
                )));
            }

            let input_manager = InputManager::new(&config.input);
            let raw = input_manager.read_document(&file).await?;
            let text = resume_ats::DocumentParser::new().extract_text(&raw)?;

            info!("Extracted {} characters", text.len());
            println!("{}", text);
        }

        Commands::Skills { file } => {
            let mut input_manager = InputManager::new(&config.input);
            let text = input_manager.extract_text(&file).await?;

            let dictionary = SkillDictionary::builtin();
            let skills = SkillExtractor::new(dictionary).extract_skills(text.as_str());

            if skills.is_empty() {
                println!("No dictionary skills found in {}", file.display());
            }
            for (category, tokens) in skills.by_category(dictionary) {
                println!("{:<14} {}", format!("{}:", category), tokens.join(", "));
            }
        }

        Commands::Compare { resume, job, output, save } => {
            cli::validate_file_extension(&resume, &["pdf", "docx"])
                .map_err(|e| ResumeAtsError::Validation(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["pdf", "docx", "txt", "md"])
                .map_err(|e| ResumeAtsError::Validation(format!("Job description file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeAtsError::Validation)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new(&config.input);
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            let dictionary = SkillDictionary::builtin();
            let comparator = SkillComparator::new(SkillExtractor::new(dictionary));
            let (resume_skills, job_skills) =
                comparator.extract_both(resume_text.as_str(), job_text.as_str())?;
            let comparison = comparator.compare(&resume_skills, &job_skills);

            let report = ComparisonReport::build(
                ReportInputs {
                    resume_file: &resume.to_string_lossy(),
                    job_file: &job.to_string_lossy(),
                    job_text: job_text.as_str(),
                    resume_skill_count: resume_skills.len(),
                    job_skill_count: job_skills.len(),
                },
                comparison,
                dictionary,
            );

            let generator = ReportGenerator::from_config(&config.output);
            let formatted = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&formatted, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", formatted),
            }
        }

        Commands::Generate { model, format, out } => {
            let target: OutputTarget = format.parse()?;

            let json = tokio::fs::read_to_string(&model).await.map_err(|e| {
                ResumeAtsError::Validation(format!("Cannot read resume model {}: {}", model.display(), e))
            })?;
            let resume = ResumeModel::from_json(&json)?;

            let document = DocumentGenerator::new(config.generation.clone()).render(&resume, target)?;
            let out_path = out.unwrap_or_else(|| PathBuf::from(document.suggested_filename()));

            tokio::fs::write(&out_path, document.bytes()).await?;
            println!(
                "Wrote {} ({}, {} bytes)",
                out_path.display(),
                document.content_type(),
                document.bytes().len()
            );
        }

        Commands::Dictionary { category } => {
            let dictionary = SkillDictionary::builtin();
            let categories = match category {
                Some(name) => vec![name.parse::<SkillCategory>()?],
                None => SkillCategory::ALL.to_vec(),
            };

            for category in categories {
                let tokens: Vec<&str> = dictionary.in_category(category).collect();
                println!("{} ({})", category, tokens.len());
                println!("  {}", tokens.join(", "));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration file: {}\n", config_path.display());
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeAtsError::OutputFormatting(format!("Failed to render config: {}", e)))?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut updated = config;
                updated.set_value(&key, &value)?;
                updated.save_to(config_path)?;
                println!("Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}
