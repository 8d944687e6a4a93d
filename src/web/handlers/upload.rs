//! Upload and retrieval handlers.

use axum::{
    body::Body,
    extract::{multipart::MultipartError, multipart::MultipartRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, Response},
    Json,
};
use std::sync::Arc;

use crate::web::dto::UploadResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::ImgdropError;

/// Message returned when the request carries no `file` part.
pub const NO_FILE_PART: &str = "No file part";

/// Multipart field holding the uploaded file.
const FILE_FIELD: &str = "file";

fn multipart_error(state: &AppState, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::payload_too_large(state.images.max_upload_size());
    }
    tracing::warn!("Failed to read multipart data: {}", e);
    ApiError::bad_request("Invalid multipart data")
}

/// GET / - Index page with the upload form.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index_html.clone())
}

/// POST /upload - Upload an image.
///
/// Expects a multipart form with a `file` part. Responds with the public
/// URL of the stored image.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Upload without multipart body: {}", e);
        ApiError::bad_request(NO_FILE_PART)
    })?;

    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A `file` field without a filename attribute is a plain form value.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        // Reject by name before reading the content.
        state.images.validate_upload(&filename, 0)?;

        let content = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&state, e))?;
        upload = Some((filename, content.to_vec()));
        break;
    }

    let (filename, content) = upload.ok_or_else(|| ApiError::bad_request(NO_FILE_PART))?;

    let record = state
        .images
        .upload(&filename, &content)
        .await
        .map_err(|e| match e {
            ImgdropError::Io(e) => {
                tracing::error!("Failed to save file: {}", e);
                ApiError::internal("Failed to save file")
            }
            ImgdropError::StoreUnavailable(_) => {
                ApiError::internal("Failed to record image metadata")
            }
            other => other.into(),
        })?;

    Ok(Json(UploadResponse::new(record.url)))
}

/// GET /uploads/:name - Serve a stored image.
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let content = state.images.fetch(&name).await.map_err(|e| match e {
        ImgdropError::NotFound(_) | ImgdropError::InvalidName(_) => {
            ApiError::not_found("File not found")
        }
        other => {
            tracing::error!("Failed to load file {}: {}", name, other);
            ApiError::internal("Failed to load file")
        }
    })?;

    let content_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}
