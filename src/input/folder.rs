//! Resume folder management

use crate::error::{CvRankerError, Result};
use crate::input::file_detector::FileType;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const CV_FOLDER_NAME: &str = "cv";

/// Result of scanning the resume folder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderScan {
    /// Supported files, ordered by file name.
    pub files: Vec<PathBuf>,
    pub pdf_count: usize,
    pub docx_count: usize,
    pub txt_count: usize,
    pub csv_count: usize,
}

impl FolderScan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} files found ({} PDF, {} DOCX, {} TXT, {} CSV)",
            self.files.len(),
            self.pdf_count,
            self.docx_count,
            self.txt_count,
            self.csv_count
        )
    }
}

/// Create `<base>/cv` if needed and return its path.
pub fn ensure_cv_folder(base: &Path) -> Result<PathBuf> {
    let folder = base.join(CV_FOLDER_NAME);
    ensure_folder(&folder)?;
    Ok(folder)
}

pub fn ensure_folder(folder: &Path) -> Result<()> {
    if !folder.exists() {
        info!("Creating resume folder: {}", folder.display());
        std::fs::create_dir_all(folder)?;
    }
    Ok(())
}

/// Resolve `configured` against `working_dir` and create it if needed.
/// The default relative `cv` folder goes through [`ensure_cv_folder`].
pub fn prepare_folder(configured: &Path, working_dir: &Path) -> Result<PathBuf> {
    if configured == Path::new(CV_FOLDER_NAME) {
        return ensure_cv_folder(working_dir);
    }

    let folder = if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        working_dir.join(configured)
    };
    if folder.is_file() {
        return Err(CvRankerError::InvalidInput(format!(
            "Resume folder path is a file: {}",
            folder.display()
        )));
    }
    ensure_folder(&folder)?;
    Ok(folder)
}

pub fn scan_folder(folder: &Path) -> Result<FolderScan> {
    if !folder.is_dir() {
        return Err(CvRankerError::InvalidInput(format!(
            "Resume folder does not exist: {}",
            folder.display()
        )));
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(folder)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut scan = FolderScan::default();
    for path in entries {
        match FileType::from_path(&path) {
            FileType::Pdf => scan.pdf_count += 1,
            FileType::Docx => scan.docx_count += 1,
            FileType::Text => scan.txt_count += 1,
            FileType::Csv => scan.csv_count += 1,
            FileType::Unknown => {
                debug!("Ignoring unsupported file: {}", path.display());
                continue;
            }
        }
        scan.files.push(path);
    }

    Ok(scan)
}

/// Open `folder` in the platform file manager.
pub fn open_folder(folder: &Path) -> Result<()> {
    let program = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    Command::new(program).arg(folder).spawn().map_err(|e| {
        CvRankerError::InvalidInput(format!(
            "Could not open '{}' with {}: {}",
            folder.display(),
            program,
            e
        ))
    })?;
    Ok(())
}
