//! Text extraction from the supported resume formats

use crate::error::{CvRankerError, Result};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // The parser can panic on malformed input; a blocking task turns that into an error.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                CvRankerError::PdfExtraction(format!(
                    "PDF parser aborted on '{}': {}",
                    path.display(),
                    e
                ))
            })?
            .map_err(|e| {
                CvRankerError::PdfExtraction(format!(
                    "Failed to extract text from PDF '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            CvRankerError::DocxExtraction(format!(
                "'{}' is not a valid DOCX archive: {}",
                path.display(),
                e
            ))
        })?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                CvRankerError::DocxExtraction(format!(
                    "'{}' has no document body: {}",
                    path.display(),
                    e
                ))
            })?
            .read_to_string(&mut xml)?;

        Self::xml_to_text(&xml)
    }
}

impl DocxExtractor {
    /// Flatten WordprocessingML into plain text, one paragraph per line.
    pub fn xml_to_text(xml: &str) -> Result<String> {
        let breaks = Regex::new(r"<w:(?:br|cr)\b[^>]*/>")
            .map_err(|e| CvRankerError::DocxExtraction(e.to_string()))?;
        let tabs = Regex::new(r"<w:tab\b[^>]*/>")
            .map_err(|e| CvRankerError::DocxExtraction(e.to_string()))?;
        let tags =
            Regex::new(r"<[^>]*>").map_err(|e| CvRankerError::DocxExtraction(e.to_string()))?;

        let text = xml.replace("</w:p>", "\n");
        let text = breaks.replace_all(&text, "\n");
        let text = tabs.replace_all(&text, "\t");
        let text = tags.replace_all(&text, "");

        let text = text
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        Ok(lines.join("\n").trim().to_string())
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct CsvExtractor;

impl TextExtractor for CsvExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Self::render_table(&bytes)
    }
}

impl CsvExtractor {
    /// Render a CSV document as a header line followed by one line per record.
    pub fn render_table(bytes: &[u8]) -> Result<String> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let mut lines = Vec::new();

        let headers = reader.headers()?.clone();
        if !headers.is_empty() {
            lines.push(headers.iter().map(str::trim).collect::<Vec<_>>().join(" | "));
        }

        for record in reader.records() {
            let record = record?;
            lines.push(record.iter().map(str::trim).collect::<Vec<_>>().join(" | "));
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_docx_xml_to_text() {
        let xml = r#"<w:document><w:body>
<w:p><w:r><w:t>Jane Roe</w:t></w:r></w:p>
<w:p><w:r><w:t>Rust</w:t><w:tab/><w:t>Go &amp; C</w:t></w:r></w:p>
<w:p><w:r><w:t>Line one</w:t><w:br/><w:t>Line two</w:t></w:r></w:p>
</w:body></w:document>"#;

        let text = DocxExtractor::xml_to_text(xml).unwrap();
        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Rust\tGo & C"));
        assert!(text.contains("Line one\nLine two"));
        assert!(!text.contains("<w:"));
    }

    #[test]
    fn test_csv_render_table() {
        let csv = b"name,skills\nJane, Rust\nJohn,Python\n";
        let text = CsvExtractor::render_table(csv).unwrap();
        assert_eq!(text, "name | skills\nJane | Rust\nJohn | Python");
    }

    #[tokio::test]
    async fn test_docx_extraction_from_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file(
                "word/document.xml",
                zip::write::SimpleFileOptions::default(),
            )
            .unwrap();
        writer
            .write_all(b"<w:document><w:body><w:p><w:r><w:t>Kubernetes operator</w:t></w:r></w:p></w:body></w:document>")
            .unwrap();
        writer.finish().unwrap();

        let text = DocxExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "Kubernetes operator");
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"definitely not a zip").unwrap();

        let err = DocxExtractor.extract(&path).await.unwrap_err();
        assert!(matches!(err, CvRankerError::DocxExtraction(_)));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-garbage").unwrap();

        assert!(PdfExtractor.extract(&path).await.is_err());
    }
}
