//! Uploaded file (transient input to a batch)

use axum::body::Bytes;

/// One file of an upload batch: its original name and raw payload
///
/// The name doubles as the match identifier of the stored record.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
