//! Input processing module
//! Turns resume and job-description sources into plain text

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::FileType;
pub use manager::InputManager;
