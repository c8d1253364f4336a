//! Candidate assessment records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Hiring recommendation attached to every assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Invite to Interview")]
    InviteToInterview,
    #[serde(rename = "Keep on Hold")]
    KeepOnHold,
    #[serde(rename = "Reject")]
    Reject,
    /// Analysis failed; only ever set on error records.
    #[serde(rename = "Error")]
    Error,
}

impl Recommendation {
    /// Values the model is asked to return, in prompt order.
    pub const WIRE_VALUES: [&'static str; 3] = ["Görüşmeye Çağır", "Yedekte Tut", "Reddet"];

    /// Map a model-supplied value onto a recommendation. Accepts the wire
    /// values and the English labels, ignoring case and surrounding space.
    pub fn from_wire(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        match value.as_str() {
            "görüşmeye çağır" | "invite to interview" => {
                Some(Recommendation::InviteToInterview)
            }
            "yedekte tut" | "keep on hold" => Some(Recommendation::KeepOnHold),
            "reddet" | "reject" => Some(Recommendation::Reject),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::InviteToInterview => "Invite to Interview",
            Recommendation::KeepOnHold => "Keep on Hold",
            Recommendation::Reject => "Reject",
            Recommendation::Error => "Error",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of analyzing one resume against one job description.
///
/// Every field is always populated; the normalizer fills in defaults for
/// anything the provider left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAssessment {
    pub candidate_name: String,
    /// 0..=100. Zero doubles as the failure sentinel.
    pub fit_score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub experience_summary: String,
    pub education_summary: String,
    pub recommendation: Recommendation,
    pub source_file_path: String,
    pub source_file_name: String,
}

impl CandidateAssessment {
    pub const MAX_SCORE: u8 = 100;

    /// Placeholder returned when the provider or the normalizer fails.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self {
            candidate_name: String::new(),
            fit_score: 0,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            experience_summary: format!("Analysis failed. Error: {}", reason),
            education_summary: String::new(),
            recommendation: Recommendation::Error,
            source_file_path: String::new(),
            source_file_name: String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.recommendation == Recommendation::Error
    }

    /// Attach the originating file.
    pub fn with_source(mut self, path: &Path) -> Self {
        self.source_file_path = path.to_string_lossy().to_string();
        self.source_file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        self
    }

    /// Candidate name, or the file name when the model returned none.
    pub fn display_name(&self) -> &str {
        let name = self.candidate_name.trim();
        if name.is_empty() {
            &self.source_file_name
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_record_shape() {
        let record = CandidateAssessment::failed("connection refused");
        assert_eq!(record.fit_score, 0);
        assert_eq!(record.recommendation, Recommendation::Error);
        assert!(record.matched_skills.is_empty());
        assert!(record.missing_skills.is_empty());
        assert!(record.experience_summary.contains("connection refused"));
        assert!(record.is_error());
    }

    #[test]
    fn test_from_wire_accepts_both_vocabularies() {
        assert_eq!(
            Recommendation::from_wire("Görüşmeye Çağır"),
            Some(Recommendation::InviteToInterview)
        );
        assert_eq!(
            Recommendation::from_wire("  keep on hold "),
            Some(Recommendation::KeepOnHold)
        );
        assert_eq!(Recommendation::from_wire("REDDET"), Some(Recommendation::Reject));
        assert_eq!(Recommendation::from_wire("Error"), None);
        assert_eq!(Recommendation::from_wire("maybe"), None);
    }

    #[test]
    fn test_with_source_and_display_name() {
        let record = CandidateAssessment::failed("x").with_source(Path::new("/tmp/cv/jane.pdf"));
        assert_eq!(record.source_file_path, "/tmp/cv/jane.pdf");
        assert_eq!(record.source_file_name, "jane.pdf");
        assert_eq!(record.display_name(), "jane.pdf");
    }

    #[test]
    fn test_recommendation_serializes_as_label() {
        let json = serde_json::to_string(&Recommendation::InviteToInterview).unwrap();
        assert_eq!(json, "\"Invite to Interview\"");
    }
}
