//! CLI interface for the CV ranker

use crate::config::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-ranker")]
#[command(about = "Rank candidate resumes against a job description with an LLM")]
#[command(
    long_about = "Extract text from PDF, DOCX, TXT and CSV resumes, ask a cloud or local LLM to assess each one against a job description, and print a ranked comparison"
)]
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

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderChoice {
    /// Cloud generative-text API
    Cloud,
    /// Local model-serving daemon
    Local,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every resume in the folder and rank the candidates
    Analyze {
        /// Job description file (TXT, PDF, DOCX)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description text
        #[arg(long)]
        job_text: Option<String>,

        /// LLM provider
        #[arg(short, long, value_enum, default_value_t = ProviderChoice::Cloud)]
        provider: ProviderChoice,

        /// Cloud API key (defaults to the configured environment variable)
        #[arg(long)]
        api_key: Option<String>,

        /// Model name (cloud model or local model)
        #[arg(short, long)]
        model: Option<String>,

        /// Provider endpoint override
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Resume folder (defaults to the configured folder)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save the rendered ranking to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show summaries and skill lists for every candidate
        #[arg(short, long)]
        detailed: bool,
    },

    /// List models installed in the local daemon
    Models {
        /// Daemon endpoint override
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Manage the resume folder
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },

    /// Print the extracted text of a resume file
    Preview {
        /// File to preview (PDF, TXT, CSV)
        file: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum FolderAction {
    /// Create the resume folder if it does not exist
    Init,
    /// Open the resume folder in the file manager
    Open,
    /// Scan the resume folder and count files per format
    Scan,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
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
