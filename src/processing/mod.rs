//! Candidate records and the batch run

pub mod assessment;
pub mod batch;

pub use assessment::{CandidateAssessment, Recommendation};
pub use batch::{BatchAnalyzer, Progress, RunContext, RunResult};
