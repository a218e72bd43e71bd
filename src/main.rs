//! Resume analyzer: ATS-style resume scoring against a job description

use clap::Parser;
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_analyzer::config::Config;
use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::input::manager::{InputManager, JobSource};
use resume_analyzer::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_analyzer::output::report::{AnalysisReport, ReportMetadata};
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::embedding_manager::EmbeddingModelManager;
use resume_analyzer::processing::embeddings::{LazyEmbeddingModel, TextEmbedder};
use resume_analyzer::processing::ranker::SemanticRanker;
use resume_analyzer::processing::readability::TextStatistics;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_result = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config_result {
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

async fn run_command(
    command: Commands,
    config: Config,
    config_file: Option<PathBuf>,
) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
            no_semantic,
        } => {
            info!("Starting resume analysis");

            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;

            if let Some(job_path) = &job {
                cli::validate_file_extension(job_path, cli::JOB_EXTENSIONS)
                    .map_err(|e| {
                        ResumeAnalyzerError::InvalidInput(format!("Job description file: {}", e))
                    })?;
            }

            let output_format = match &output {
                Some(format) => {
                    cli::parse_output_format(format).map_err(ResumeAnalyzerError::InvalidInput)?
                }
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let job_source = match (job, job_text) {
                (Some(path), _) => JobSource::File(path),
                (None, Some(text)) => JobSource::Text(text),
                (None, None) => JobSource::None,
            };

            println!("🚀 Resume analysis");
            println!("📄 Resume: {}", resume.display());
            println!("💼 Job Description: {}", job_source.label());
            println!("🔧 Output Format: {:?}", output_format);

            println!("\n📂 Extracting text...");
            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_description = input_manager.extract_job_description(&job_source).await?;

            println!(
                "📊 Resume: {} characters | Job description: {} characters",
                resume_text.chars().count(),
                job_description.chars().count()
            );

            println!("\n🔍 Scoring resume...");
            let engine = AnalysisEngine::from_config(&config)?;
            let detailed_analysis = engine.analyze_detailed(&resume_text, &job_description);

            let ranker = build_ranker(&config, no_semantic);
            let semantic_matches = ranker.rank(&resume_text, &detailed_analysis.job_skill_targets);
            let readability = TextStatistics::from_text(&resume_text);

            let metadata = ReportMetadata::new(
                resume.display().to_string(),
                job_source.label(),
                ranker.strategy_name(),
            );
            let report =
                AnalysisReport::new(metadata, detailed_analysis, semantic_matches, readability);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(target) => {
                    let path = resolve_save_path(&target, output_format, &resume.to_string_lossy());
                    save_report_to_file(&rendered, &path)?;
                    println!("\n💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            println!("🎯 Analysis complete! ATS score: {}/100", report.analysis.ats_score);
        }

        Commands::Models { action } => {
            let mut model_manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

            match action {
                ModelAction::List => {
                    println!("🧠 Embedding Models\n");

                    for model in model_manager.list_available_models() {
                        let status = if model_manager.is_model_downloaded(&model.id) {
                            "✅ Downloaded"
                        } else {
                            "⬇️  Available"
                        };
                        let marker = if model.id == config.models.embedding_model {
                            " (configured)"
                        } else {
                            ""
                        };

                        println!(
                            "  • {} [{}]{} - {} MB",
                            model.id, status, marker, model.size_mb
                        );
                        println!("    {} ({})", model.description, model.repo_id);
                    }

                    if model_manager.list_downloaded_models().is_empty() {
                        println!(
                            "\n💡 No models downloaded yet; job skills are ranked lexically. \
                             Get started with:"
                        );
                        println!(
                            "   resume-analyzer models download {}",
                            config.models.embedding_model
                        );
                    }
                }

                ModelAction::Download { model, force } => {
                    let model_id = model_manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(model.clone()))?;

                    if !force && model_manager.is_model_downloaded(&model_id) {
                        println!("✅ Model '{}' is already downloaded!", model_id);
                        println!("💡 Use --force to re-download");
                        return Ok(());
                    }

                    println!("⬇️  Downloading model: {}", model_id);
                    match model_manager.download_model(&model_id, force).await {
                        Ok(model_path) => {
                            println!("✅ Model '{}' downloaded successfully!", model_id);
                            println!("📁 Location: {}", model_path.display());
                        }
                        Err(e) => {
                            println!("❌ Failed to download model '{}': {}", model_id, e);
                            return Err(e);
                        }
                    }
                }

                ModelAction::Remove { model } => {
                    if model_manager.remove_model(&model).await? {
                        println!("✅ Model '{}' removed successfully!", model);
                    } else {
                        println!("⚠️  Model '{}' is not downloaded", model);
                    }
                }

                ModelAction::Info { model } => {
                    let model_id = model_manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(model.clone()))?;
                    let model_info = model_manager
                        .get_model_info(&model_id)
                        .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(model_id.clone()))?;

                    println!("📋 Model Information for '{}'\n", model_id);
                    println!("Name: {}", model_info.name);
                    println!("Repository: {}", model_info.repo_id);
                    println!("Size: {} MB", model_info.size_mb);
                    println!("Dimensions: {}", model_info.dimensions);
                    println!("Description: {}", model_info.description);

                    match model_manager.get_model_path(&model_id) {
                        Some(path) => println!("Status: ✅ Downloaded ({})", path.display()),
                        None => {
                            println!("Status: ⬇️  Available for download");
                            println!("\n💡 To download this model, run:");
                            println!("   resume-analyzer models download {}", model_id);
                        }
                    }
                }
            }
        }

        Commands::Config { action } => {
            let config_path = config_file.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Models Directory: {}", config.models_dir().display());
                    println!("Embedding Model: {}", config.models.embedding_model);
                    let semantic = if config.models.enable_semantic {
                        "enabled"
                    } else {
                        "disabled"
                    };
                    println!("Semantic Ranking: {}", semantic);
                    println!("\nAnalysis:");
                    println!("  Preview length: {} characters", config.analysis.preview_chars);
                    println!("  Ranked job skills: {}", config.analysis.semantic_top_k);
                    println!(
                        "  Extra technical skills: {}",
                        config.analysis.extra_technical_skills.join(", ")
                    );
                    println!(
                        "  Extra soft skills: {}",
                        config.analysis.extra_soft_skills.join(", ")
                    );
                    println!("\nOutput:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Detailed: {}", config.output.detailed);
                    println!("  Colors: {}", config.output.color_output);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
        }
    }

    Ok(())
}

/// Embedding-backed ranker when enabled and the model is on disk, lexical otherwise
fn build_ranker(config: &Config, no_semantic: bool) -> SemanticRanker {
    let top_k = config.analysis.semantic_top_k;

    if no_semantic || !config.models.enable_semantic {
        return SemanticRanker::lexical(top_k);
    }

    let model = LazyEmbeddingModel::new(config.embedding_model_path());
    match model.get() {
        Some(engine) => {
            info!("Ranking job skills with embedding model {}", engine.model_name());
            SemanticRanker::new(Some(engine as Arc<dyn TextEmbedder>), top_k)
        }
        None => {
            info!(
                "Embedding model unavailable at {}, using lexical ranking",
                model.model_path().display()
            );
            SemanticRanker::lexical(top_k)
        }
    }
}
