//! Contract of the external upload collaborator (`POST /api/upload`).
//!
//! The crop engine never depends on upload results; this module only fixes
//! the request limits and how responses map to user-facing messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DAILY_UPLOAD_LIMIT, MAX_UPLOAD_BYTES};
use crate::source::{ImageMime, SourceFile};

pub const UPLOAD_ENDPOINT: &str = "/api/upload";

/// Multipart form field carrying the file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No file provided")]
    MissingFile,

    #[error("Invalid file type. Only images are allowed.")]
    UnsupportedType,

    #[error("File too large. Maximum size is 10MB.")]
    TooLarge { size: usize },

    /// Literal message from the server's per-IP quota check.
    #[error("{0}")]
    QuotaExceeded(String),

    #[error("{0}")]
    Server(String),

    #[error("Upload failed: {0}")]
    Network(String),
}

/// JSON body returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Uploaded { url: String },
    Rejected { error: String },
}

/// Posts a file and returns the public URL.
pub trait Uploader {
    fn upload(&self, file: &SourceFile) -> Result<String, UploadError>;
}

/// Message used when the quota response carries no body.
pub fn quota_exceeded_message() -> String {
    format!("Upload limit reached. You can upload up to {DAILY_UPLOAD_LIMIT} images per day.")
}

/// Checks the endpoint applies before accepting a file.
pub fn validate_upload(mime_type: &str, size: usize) -> Result<(), UploadError> {
    if size == 0 {
        return Err(UploadError::MissingFile);
    }
    if ImageMime::from_mime(mime_type).is_none() {
        return Err(UploadError::UnsupportedType);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    Ok(())
}

/// Map an HTTP status and body to the uploaded URL or a reportable error.
pub fn parse_upload_response(status: u16, body: &str) -> Result<String, UploadError> {
    let parsed = serde_json::from_str::<UploadResponse>(body).ok();
    match (status, parsed) {
        (200..=299, Some(UploadResponse::Uploaded { url })) => Ok(url),
        (429, Some(UploadResponse::Rejected { error })) => Err(UploadError::QuotaExceeded(error)),
        (429, _) => Err(UploadError::QuotaExceeded(quota_exceeded_message())),
        (_, Some(UploadResponse::Rejected { error })) => Err(UploadError::Server(error)),
        (status, _) => Err(UploadError::Server(format!(
            "Upload failed with status {status}"
        ))),
    }
}
