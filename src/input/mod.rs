//! Input processing module
//! Handles file detection, text extraction and the resume folder

pub mod file_detector;
pub mod folder;
pub mod manager;
pub mod text_extractor;

pub use file_detector::FileType;
pub use manager::{DocumentReader, InputManager};
