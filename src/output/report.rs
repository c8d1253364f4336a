//! Ranking report built from a finished run

use crate::processing::assessment::CandidateAssessment;
use crate::processing::batch::{RunResult, SkippedFile};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,
    pub provider: String,
    pub summary: RunSummary,
    pub candidates: Vec<RankedCandidate>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_attempted: usize,
    pub analyzed: usize,
    pub errors: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    #[serde(flatten)]
    pub assessment: CandidateAssessment,
}

impl RankingReport {
    pub fn from_run(result: &RunResult, provider: impl Into<String>) -> Self {
        let candidates = result
            .ranked()
            .into_iter()
            .enumerate()
            .map(|(index, assessment)| RankedCandidate {
                rank: index + 1,
                assessment: assessment.clone(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            provider: provider.into(),
            summary: RunSummary {
                files_attempted: result.files_attempted,
                analyzed: result.analyzed_count(),
                errors: result.error_count(),
                skipped: result.skipped.len(),
            },
            candidates,
            skipped: result.skipped.clone(),
        }
    }

    pub fn top(&self) -> Option<&RankedCandidate> {
        self.candidates.first()
    }
}
