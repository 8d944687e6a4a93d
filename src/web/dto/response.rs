//! Response DTOs for the HTTP layer.

use serde::{Deserialize, Serialize};

/// Message sent with every successful upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Image uploaded successfully";

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable status message.
    pub message: String,
    /// Public URL of the stored image.
    pub url: String,
}

impl UploadResponse {
    /// Create an upload response for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            url: url.into(),
        }
    }
}
