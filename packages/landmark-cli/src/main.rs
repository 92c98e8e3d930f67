// Command-line entry point for landmark image generation

mod config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use landmark::providers::{GroqLanguageModel, ReplicateImageGenerator};
use landmark::{AcceptancePolicy, LandmarkOrchestrator, OrchestratorConfig, ProcessedLandmark};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Generate images of a landmark from a language-model description.
#[derive(Debug, Parser)]
#[command(name = "landmark", version, about)]
struct Cli {
    /// Landmark name, e.g. "Eiffel Tower"
    name: String,

    /// Number of images to generate
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    count: u8,

    /// Directory generated images are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Reject records whose fields are missing, not only those marked no_value
    #[arg(long)]
    count_absent: bool,

    /// Print the landmark record as JSON instead of a listing
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,landmark=debug,replicate_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let orchestrator = LandmarkOrchestrator::new(
        GroqLanguageModel::new(&config.credentials.llm_api_key),
        ReplicateImageGenerator::new(&config.credentials.image_api_token),
        orchestrator_config(&cli, &config),
    );

    println!(
        "Generating {} image(s) for: {}",
        cli.count,
        cli.name.bold()
    );

    let results = orchestrator
        .process_many(&cli.name, usize::from(cli.count))
        .await;

    let mut generated: Vec<ProcessedLandmark> = Vec::new();
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Ok(processed) => {
                println!(
                    "{} {}  {}",
                    "✓".bright_green(),
                    processed.image.path.display(),
                    processed.image.caption_or(i).italic()
                );
                generated.push(processed);
            }
            Err(e) => {
                println!("{} Error generating image {}: {}", "✗".bright_red(), i + 1, e);
            }
        }
    }

    let Some(first) = generated.first() else {
        bail!("No images were generated.");
    };

    println!();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&first.record)?);
    } else {
        println!("{}", "Landmark Details".bright_cyan().bold());
        for line in detail_lines(first) {
            println!("{}", line);
        }
    }

    Ok(())
}

fn orchestrator_config(cli: &Cli, config: &Config) -> OrchestratorConfig {
    let mut orchestrator_config = OrchestratorConfig::default().with_policy(
        AcceptancePolicy::default().with_count_absent_as_missing(cli.count_absent),
    );

    // Flag wins over environment
    if let Some(dir) = cli.output_dir.clone().or_else(|| config.output_dir.clone()) {
        orchestrator_config = orchestrator_config.with_output_dir(dir);
    }

    orchestrator_config
}

fn detail_lines(processed: &ProcessedLandmark) -> Vec<String> {
    processed
        .record
        .details()
        .map(|(label, value)| format!("{}: {}", label.bold(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use landmark::{ApiCredentials, GeneratedImage, LandmarkField, LandmarkRecord};

    fn config(output_dir: Option<&str>) -> Config {
        Config {
            credentials: ApiCredentials::new("gsk", "r8"),
            output_dir: output_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn test_count_defaults_to_one_and_is_bounded() {
        let cli = Cli::try_parse_from(["landmark", "Big Ben"]).unwrap();
        assert_eq!(cli.count, 1);

        assert!(Cli::try_parse_from(["landmark", "Big Ben", "-n", "5"]).is_ok());
        assert!(Cli::try_parse_from(["landmark", "Big Ben", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["landmark", "Big Ben", "-n", "6"]).is_err());
    }

    #[test]
    fn test_output_dir_flag_overrides_env() {
        let cli = Cli::try_parse_from(["landmark", "Big Ben", "-o", "/tmp/flag"]).unwrap();
        let resolved = orchestrator_config(&cli, &config(Some("/tmp/env")));
        assert_eq!(resolved.output_dir, PathBuf::from("/tmp/flag"));

        let cli = Cli::try_parse_from(["landmark", "Big Ben"]).unwrap();
        let resolved = orchestrator_config(&cli, &config(Some("/tmp/env")));
        assert_eq!(resolved.output_dir, PathBuf::from("/tmp/env"));

        let resolved = orchestrator_config(&cli, &config(None));
        assert_eq!(resolved.output_dir, PathBuf::from("generated_images"));
    }

    #[test]
    fn test_count_absent_flag_sets_policy() {
        let cli = Cli::try_parse_from(["landmark", "Big Ben", "--count-absent"]).unwrap();
        assert!(orchestrator_config(&cli, &config(None)).policy.count_absent_as_missing);
    }

    #[test]
    fn test_detail_lines_skip_missing_fields() {
        colored::control::set_override(false);
        let processed = ProcessedLandmark {
            image: GeneratedImage {
                path: PathBuf::from("generated_images/a.jpg"),
                caption: None,
            },
            record: LandmarkRecord::new()
                .with(LandmarkField::Description, "A clock tower")
                .with(LandmarkField::GeographicalLocation, "London")
                .with_error(""),
        };

        assert_eq!(
            detail_lines(&processed),
            vec![
                "Description: A clock tower".to_string(),
                "Geographical Location: London".to_string()
            ]
        );
    }
}
