//! Ingestion data models

pub mod batch_result;
pub mod uploaded_file;

pub use batch_result::{BatchResult, FileOutcome};
pub use uploaded_file::UploadedFile;
