//! CV ranker: rank candidate resumes against a job description with an LLM

use anyhow::Context;
use clap::Parser;
use cv_ranker::cli::{self, Cli, Commands, ConfigAction, FolderAction, ProviderChoice};
use cv_ranker::config::Config;
use cv_ranker::input::folder as resume_folder;
use cv_ranker::input::InputManager;
use cv_ranker::llm::local;
use cv_ranker::llm::provider::{build_http_client, Provider, ProviderConfig};
use cv_ranker::output::formatter::{resolve_save_path, save_report_to_file};
use cv_ranker::output::{RankingReport, ReportGenerator};
use cv_ranker::processing::batch::{BatchAnalyzer, FileOutcome, RunContext};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            job,
            job_text,
            provider,
            api_key,
            model,
            endpoint,
            folder,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let folder = resolve_folder(&config, folder)?;
            let scan = resume_folder::scan_folder(&folder)?;
            info!("{}: {}", folder.display(), scan.summary());

            let job_description = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, &["txt", "pdf", "docx"])
                        .map_err(anyhow::Error::msg)
                        .with_context(|| format!("Job description file {}", path.display()))?;
                    InputManager::new().extract_text(&path).await?
                }
                (None, Some(text)) => text,
                (None, None) => String::new(),
            };

            let client = build_http_client(config.request_timeout())?;
            let provider_config = match provider {
                ProviderChoice::Cloud => ProviderConfig::Cloud {
                    api_key: api_key
                        .or_else(|| config.cloud_api_key_from_env())
                        .unwrap_or_default(),
                    model: model.unwrap_or_else(|| config.cloud.model.clone()),
                    endpoint: endpoint.unwrap_or_else(|| config.cloud.endpoint.clone()),
                },
                ProviderChoice::Local => {
                    let endpoint = endpoint.unwrap_or_else(|| config.local.endpoint.clone());
                    let model_name = match model.or_else(|| config.local.default_model.clone()) {
                        Some(model) => model,
                        None => {
                            let installed = local::list_models(&client, &endpoint).await;
                            match installed.into_iter().next() {
                                Some(first) => {
                                    info!("No model selected; using {}", first);
                                    first
                                }
                                None => {
                                    warn!(
                                        "No local models found. Is the daemon running at {}?",
                                        endpoint
                                    );
                                    String::new()
                                }
                            }
                        }
                    };
                    ProviderConfig::Local { model_name, endpoint }
                }
            };

            let context = RunContext::new(provider_config, job_description, scan.files);
            let analyzer = BatchAnalyzer::new(
                InputManager::new(),
                Provider::from_config(&context.provider, client),
            );

            let progress_bar = ProgressBar::new(context.files.len() as u64);
            progress_bar.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );

            let result = analyzer
                .run(&context, |progress| {
                    let name = progress
                        .file
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    match progress.outcome {
                        FileOutcome::Analyzed => {}
                        FileOutcome::ProviderFailed => {
                            progress_bar.println(format!("analysis failed: {}", name))
                        }
                        FileOutcome::Skipped(reason) => {
                            progress_bar.println(format!("skipped {} ({:?})", name, reason))
                        }
                    }
                    progress_bar.set_message(name);
                    progress_bar.set_position(progress.completed as u64);
                })
                .await;
            progress_bar.finish_and_clear();
            let result = result?;

            let report = RankingReport::from_run(&result, context.provider.label());
            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed || config.output.detailed,
                true,
            );
            let rendered = generator.generate_report(&report, output_format)?;
            println!("{}", rendered);
            if let Some(top) = report.top() {
                info!(
                    "Top candidate: {} ({})",
                    top.assessment.display_name(),
                    top.assessment.fit_score
                );
            }

            if let Some(target) = save {
                let path = resolve_save_path(&target, output_format);
                let plain = ReportGenerator::with_options(false, true, true)
                    .generate_report(&report, output_format)?;
                save_report_to_file(&plain, &path)?;
                println!("Saved ranking to {}", path.display());
            }
        }

        Commands::Models { endpoint } => {
            let endpoint = endpoint.unwrap_or_else(|| config.local.endpoint.clone());
            let client = build_http_client(config.request_timeout())?;

            match local::try_list_models(&client, &endpoint).await {
                Ok(models) if models.is_empty() => {
                    println!("No models installed at {}", endpoint);
                }
                Ok(models) => {
                    println!("Models at {}:", endpoint);
                    for model in models {
                        println!("  • {}", model);
                    }
                }
                Err(e) => {
                    println!("Local daemon not reachable at {}: {}", endpoint, e);
                    println!("Make sure the model server is running (e.g. `ollama serve`).");
                }
            }
        }

        Commands::Folder { action } => {
            let folder = resolve_folder(&config, None)?;
            match action {
                FolderAction::Init => {
                    println!("Resume folder: {}", folder.display());
                }
                FolderAction::Open => {
                    resume_folder::open_folder(&folder)?;
                }
                FolderAction::Scan => {
                    let scan = resume_folder::scan_folder(&folder)?;
                    if scan.is_empty() {
                        println!(
                            "Folder is empty or has no supported files. Add resumes to {}",
                            folder.display()
                        );
                    } else {
                        println!("{}", scan.summary());
                        for file in &scan.files {
                            println!("  • {}", file.display());
                        }
                    }
                }
            }
        }

        Commands::Preview { file } => {
            let text = InputManager::new()
                .preview(&file)
                .await
                .with_context(|| format!("Cannot preview {}", file.display()))?;
            println!("{}", text);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content =
                    toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", content);
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
        },
    }

    Ok(())
}

/// `--folder` wins over the configured folder; either is created if missing.
fn resolve_folder(config: &Config, folder: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let working_dir = std::env::current_dir().context("Cannot determine working directory")?;
    let configured = folder.unwrap_or_else(|| config.folder.path.clone());
    Ok(resume_folder::prepare_folder(&configured, &working_dir)?)
}
