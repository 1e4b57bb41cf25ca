//! Input processing module
//! Handles file detection, text extraction, and resume collection

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::{collect_resume_paths, InputManager};
