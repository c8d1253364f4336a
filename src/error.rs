//! Error handling for the CV ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvRankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("CSV extraction error: {0}")]
    CsvExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Run cannot start: {}", .0.join("; "))]
    Preconditions(Vec<String>),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CvRankerError>;

impl From<zip::result::ZipError> for CvRankerError {
    fn from(err: zip::result::ZipError) -> Self {
        CvRankerError::DocxExtraction(err.to_string())
    }
}

impl From<csv::Error> for CvRankerError {
    fn from(err: csv::Error) -> Self {
        CvRankerError::CsvExtraction(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preconditions_message_lists_every_reason() {
        let err = CvRankerError::Preconditions(vec![
            "job description is empty".to_string(),
            "no resume files found".to_string(),
        ]);
        let message = err.to_string();
        assert!(message.contains("job description is empty"));
        assert!(message.contains("no resume files found"));
    }
}
