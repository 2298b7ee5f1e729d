//! Match upload endpoint
//!
//! POST /api/match/upload takes a multipart form whose `files` parts are
//! the match documents. Only request-level problems (no files, oversized
//! file, unreadable multipart body) fail the request; everything about an
//! individual document is reported in the batch summary.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::models::{BatchResult, UploadedFile};
use crate::AppState;

/// Multipart field name carrying match files
pub const UPLOAD_FIELD: &str = "files";

/// POST /api/match/upload
pub async fn upload_matches(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<BatchResult>> {
    // A request that isn't multipart at all carries no files either
    let mut multipart = multipart.map_err(|rejection| {
        debug!(error = %rejection, "Upload request is not multipart");
        ApiError::NoFiles
    })?;

    let files = read_uploaded_files(&mut multipart, state.limits.max_file_bytes).await?;
    if files.is_empty() {
        return Err(ApiError::NoFiles);
    }

    Ok(Json(state.ingestor.ingest(&files).await))
}

/// Collect every `files` part that carries a file name, in form order
async fn read_uploaded_files(
    multipart: &mut Multipart,
    max_file_bytes: usize,
) -> ApiResult<Vec<UploadedFile>> {
    let mut files = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }
        // Browsers send filename="" for an empty file input
        let Some(name) = field
            .file_name()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
        else {
            debug!("Ignoring files part without a file name");
            continue;
        };

        let mut content = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if content.len() + chunk.len() > max_file_bytes {
                return Err(ApiError::FileTooLarge);
            }
            content.extend_from_slice(&chunk);
        }

        files.push(UploadedFile::new(name, content));
    }

    Ok(files)
}
