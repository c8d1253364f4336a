//! Batch analysis across the resume folder

use crate::error::{CvRankerError, Result};
use crate::input::file_detector::FileType;
use crate::input::manager::DocumentReader;
use crate::llm::provider::{AnalysisProvider, ProviderConfig};
use crate::processing::assessment::CandidateAssessment;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything one run needs. Read-only while the run is in progress.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub provider: ProviderConfig,
    pub job_description: String,
    pub files: Vec<PathBuf>,
}

impl RunContext {
    pub fn new(provider: ProviderConfig, job_description: String, files: Vec<PathBuf>) -> Self {
        Self {
            provider,
            job_description,
            files,
        }
    }

    /// One message per unmet precondition.
    pub fn unmet_preconditions(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if let Some(reason) = self.provider.missing_requirement() {
            reasons.push(reason);
        }
        if self.job_description.trim().is_empty() {
            reasons.push("enter a job description".to_string());
        }
        if self.files.is_empty() {
            reasons.push("no resume files found; add files to the folder and rescan".to_string());
        }
        reasons
    }

    pub fn validate(&self) -> Result<()> {
        let reasons = self.unmet_preconditions();
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(CvRankerError::Preconditions(reasons))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    UnsupportedFormat,
    ExtractionFailed,
    EmptyText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Analyzed,
    ProviderFailed,
    Skipped(SkipReason),
}

/// Reported after every file, whether or not it produced a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress<'a> {
    pub completed: usize,
    pub total: usize,
    pub file: &'a Path,
    pub outcome: FileOutcome,
}

impl Progress<'_> {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Published output of one run. Replaces any earlier run's output in full.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunResult {
    /// Records in file order. May be shorter than the file list.
    pub assessments: Vec<CandidateAssessment>,
    pub skipped: Vec<SkippedFile>,
    pub files_attempted: usize,
}

impl RunResult {
    pub fn error_count(&self) -> usize {
        self.assessments.iter().filter(|a| a.is_error()).count()
    }

    pub fn analyzed_count(&self) -> usize {
        self.assessments.len() - self.error_count()
    }

    /// Records by descending fit score; ties keep file order.
    pub fn ranked(&self) -> Vec<&CandidateAssessment> {
        let mut ranked: Vec<&CandidateAssessment> = self.assessments.iter().collect();
        ranked.sort_by(|a, b| b.fit_score.cmp(&a.fit_score));
        ranked
    }
}

/// Drives extraction and analysis for every file, one at a time.
pub struct BatchAnalyzer<R, P> {
    reader: R,
    provider: P,
}

impl<R: DocumentReader, P: AnalysisProvider> BatchAnalyzer<R, P> {
    pub fn new(reader: R, provider: P) -> Self {
        Self { reader, provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run the batch. Fails only on unmet preconditions; per-file problems
    /// become skips or error records.
    pub async fn run<F>(&self, context: &RunContext, mut on_progress: F) -> Result<RunResult>
    where
        F: FnMut(&Progress<'_>),
    {
        context.validate()?;

        let total = context.files.len();
        info!("Analyzing {} files with {}", total, context.provider.label());

        let mut result = RunResult::default();
        for (index, path) in context.files.iter().enumerate() {
            let outcome = self
                .process_file(path, &context.job_description, &mut result)
                .await;

            result.files_attempted += 1;
            on_progress(&Progress {
                completed: index + 1,
                total,
                file: path,
                outcome,
            });
        }

        info!(
            "Run finished: {} records, {} errors, {} skipped",
            result.assessments.len(),
            result.error_count(),
            result.skipped.len()
        );
        Ok(result)
    }

    async fn process_file(
        &self,
        path: &Path,
        job_description: &str,
        result: &mut RunResult,
    ) -> FileOutcome {
        let mut skip = |reason: SkipReason| {
            result.skipped.push(SkippedFile {
                path: path.to_path_buf(),
                reason,
            });
            FileOutcome::Skipped(reason)
        };

        if !FileType::from_path(path).is_supported() {
            debug!("Skipping unsupported file: {}", path.display());
            return skip(SkipReason::UnsupportedFormat);
        }

        let text = match self.reader.read_text(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return skip(SkipReason::ExtractionFailed);
            }
        };

        if text.trim().is_empty() {
            debug!("No text extracted from {}", path.display());
            return skip(SkipReason::EmptyText);
        }

        let assessment = self
            .provider
            .analyze(&text, job_description)
            .await
            .with_source(path);

        let outcome = if assessment.is_error() {
            FileOutcome::ProviderFailed
        } else {
            FileOutcome::Analyzed
        };
        result.assessments.push(assessment);
        outcome
    }
}
