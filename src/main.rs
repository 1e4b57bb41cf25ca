//! Resume ranker: rank resumes against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::error::{RankerError, Result};
use resume_ranker::input::file_detector::SUPPORTED_EXTENSIONS;
use resume_ranker::input::{collect_resume_paths, InputManager};
use resume_ranker::output::formatter::suggest_filename;
use resume_ranker::output::{save_report_to_file, LeaderboardReport, ReportGenerator};
use resume_ranker::processing::embedding_manager::EmbeddingModelManager;
use resume_ranker::processing::embeddings::load_embedder;
use resume_ranker::processing::ranker::Ranker;
use resume_ranker::processing::scorer::extract_job_title;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            model,
            format,
            save,
            detailed,
            no_fallback,
        } => {
            let mut config = config;
            if no_fallback {
                config.models.allow_hashing_fallback = false;
            }
            run_rank(&config, &job, &resumes, model.as_deref(), format.as_deref(), save, detailed).await
        }

        Commands::Models { action } => run_models(&config, action).await,

        Commands::Config { action } => {
            let config_path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                    println!("⚙️  Configuration ({})\n", config_path.display());
                    println!("{}", content);
                }
                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset: {}", config_path.display());
                }
            }
            Ok(())
        }
    }
}

async fn run_rank(
    config: &Config,
    job: &Path,
    resumes: &[PathBuf],
    model: Option<&str>,
    format: Option<&str>,
    save: Option<PathBuf>,
    detailed: bool,
) -> Result<()> {
    cli::validate_file_extension(job, &SUPPORTED_EXTENSIONS)
        .map_err(|e| RankerError::InvalidInput(format!("Job description file: {}", e)))?;

    let output_format = match format {
        Some(format) => cli::parse_output_format(format).map_err(RankerError::InvalidInput)?,
        None => config.output.format,
    };

    let mut input_manager = InputManager::new();
    let job_text = input_manager.load_job_description(job).await?;
    let resume_paths = collect_resume_paths(resumes)?;

    info!("Extracting text from {} resumes", resume_paths.len());
    let progress = ProgressBar::new(resume_paths.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut inputs = Vec::with_capacity(resume_paths.len());
    for path in &resume_paths {
        progress.set_message(path.display().to_string());
        inputs.push(input_manager.extract_resume(path).await);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let embedder = load_embedder(config, model).await?;
    let ranker = Ranker::from_config(embedder.as_ref(), config);
    let leaderboard = ranker.rank(&job_text, &inputs)?;

    let report = LeaderboardReport::new(
        &leaderboard,
        &job.display().to_string(),
        &extract_job_title(&job_text),
        embedder.name(),
    );

    let generator = ReportGenerator::with_options(
        config.output.color_output,
        detailed || config.output.detailed,
        true,
        true,
    );
    let rendered = generator.generate_report(&report, &output_format)?;
    println!("{}", rendered);

    if let Some(save_path) = save {
        let save_path = if save_path.is_dir() {
            save_path.join(suggest_filename(&output_format, true))
        } else {
            save_path
        };
        let content = if output_format == OutputFormat::Console {
            // Plain text on disk
            ReportGenerator::with_options(false, detailed || config.output.detailed, true, true)
                .generate_report(&report, &output_format)?
        } else {
            rendered
        };
        save_report_to_file(&content, &save_path)?;
        println!("💾 Saved to {}", save_path.display());
    }

    Ok(())
}

async fn run_models(config: &Config, action: ModelAction) -> Result<()> {
    let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

    match action {
        ModelAction::List => {
            println!("📚 Available Embedding Models\n");
            for (id, info) in manager.list_available_models() {
                let status = if manager.is_model_downloaded(id) {
                    "✅ Downloaded"
                } else {
                    "⬇️  Available"
                };
                println!("  • {} ({}) - {} MB [{}]", id, info.repo_id, info.size_mb, status);
                println!("    {}", info.description);
            }
            println!("\nConfigured model: {}", config.models.embedding_model);
        }

        ModelAction::Download { model, force } => {
            let model_id = manager
                .resolve_model_id(&model)
                .ok_or_else(|| RankerError::ModelNotFound(model.clone()))?;

            if !force && manager.is_model_downloaded(&model_id) {
                println!("✅ Model '{}' is already downloaded", model_id);
                println!("💡 Use --force to re-download");
                return Ok(());
            }

            let model_path = manager.download_model(&model_id).await?;
            println!("✅ Model '{}' downloaded to {}", model_id, model_path.display());
        }

        ModelAction::Info { model } => {
            let model_id = manager
                .resolve_model_id(&model)
                .ok_or_else(|| RankerError::ModelNotFound(model.clone()))?;
            let info = manager
                .get_model_info(&model_id)
                .ok_or_else(|| RankerError::ModelNotFound(model_id.clone()))?;

            println!("📋 Model Information for '{}'\n", model_id);
            println!("Name: {}", info.name);
            println!("Repository: {}", info.repo_id);
            println!("Size: {} MB", info.size_mb);
            println!("Dimensions: {}", info.dimensions);
            println!("Description: {}", info.description);
            match manager.get_model_path(&model_id) {
                Some(path) => println!("Status: ✅ Downloaded ({})", path.display()),
                None => println!("Status: ⬇️  Available for download"),
            }
        }
    }

    Ok(())
}
