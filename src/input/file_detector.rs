//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Csv,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "csv" => FileType::Csv,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileType::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Docx => "DOCX",
            FileType::Text => "TXT",
            FileType::Csv => "CSV",
            FileType::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert_eq!(FileType::from_path(Path::new("/cv/Alice.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("bob.Docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("notes.TXT")), FileType::Text);
        assert_eq!(FileType::from_path(Path::new("export.csv")), FileType::Csv);
    }

    #[test]
    fn test_unsupported_and_missing_extensions() {
        assert_eq!(FileType::from_path(Path::new("setup.exe")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("README")), FileType::Unknown);
        assert!(!FileType::Unknown.is_supported());
        assert!(FileType::Csv.is_supported());
    }
}
