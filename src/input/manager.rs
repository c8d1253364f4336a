//! Input manager routing each file to its extractor

use crate::error::{CvRankerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    CsvExtractor, DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use std::future::Future;
use std::path::Path;

/// Source of resume text consumed by the batch analyzer.
pub trait DocumentReader {
    fn read_text(&self, path: &Path) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CvRankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Csv => {
                info!("Reading CSV file: {}", path.display());
                CsvExtractor.extract(path).await
            }
            FileType::Unknown => Err(CvRankerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }

    /// Text shown when an operator previews a file. DOCX has no preview.
    pub async fn preview(&self, path: &Path) -> Result<String> {
        match FileType::from_path(path) {
            FileType::Docx => Err(CvRankerError::UnsupportedFormat(format!(
                "Preview is available for PDF, TXT and CSV files only; open '{}' locally",
                path.display()
            ))),
            _ => self.extract_text(path).await,
        }
    }
}

impl DocumentReader for InputManager {
    async fn read_text(&self, path: &Path) -> Result<String> {
        self.extract_text(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_extraction_from_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane.txt");
        std::fs::write(&path, "Jane Doe\nSenior Rust Engineer\nTokio, Axum").unwrap();

        let text = InputManager::new().extract_text(&path).await.unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Tokio"));
    }

    #[tokio::test]
    async fn test_text_extraction_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.CSV");
        std::fs::write(&path, "name,years\nJane,7\n").unwrap();

        let text = InputManager::new().extract_text(&path).await.unwrap();
        assert_eq!(text, "name | years\nJane | 7");
    }

    #[tokio::test]
    async fn test_unsupported_file_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installer.exe");
        std::fs::write(&path, [0u8, 1, 2]).unwrap();

        let err = InputManager::new().extract_text(&path).await.unwrap_err();
        assert!(matches!(err, CvRankerError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_nonexistent_file() {
        let result = InputManager::new()
            .extract_text(Path::new("does/not/exist.txt"))
            .await;
        assert!(matches!(result, Err(CvRankerError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_preview_rejects_docx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, b"zip").unwrap();

        let err = InputManager::new().preview(&path).await.unwrap_err();
        assert!(matches!(err, CvRankerError::UnsupportedFormat(_)));
    }
}
