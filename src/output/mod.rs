//! Ranking presentation

pub mod formatter;
pub mod report;

pub use formatter::ReportGenerator;
pub use report::RankingReport;
