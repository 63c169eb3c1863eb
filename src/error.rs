//! Error taxonomy for the media endpoints.
//!
//! Every storage fault is caught at the handler boundary and translated into
//! a structured HTTP response here; nothing escapes to the transport layer.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    /// Missing file, or a path that resolves outside the media root.
    #[error("media file not found")]
    NotFound,

    /// Syntactically valid range that cannot be satisfied against the file.
    ///
    /// Carries the total file size so the response can advertise
    /// `Content-Range: bytes */<size>`, which tells players to retry with a
    /// full-file request instead of treating the stream as corrupt.
    #[error("requested range not satisfiable")]
    RangeNotSatisfiable { size: u64 },

    /// Underlying I/O failure while reading the file or directory.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        match self {
            MediaError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "media not found" })),
            )
                .into_response(),
            MediaError::RangeNotSatisfiable { size } => (
                StatusCode::RANGE_NOT_SATISFIABLE,
                [(header::CONTENT_RANGE, format!("bytes */{}", size))],
                Json(serde_json::json!({ "error": "range not satisfiable" })),
            )
                .into_response(),
            MediaError::Storage(e) => {
                tracing::error!("Storage error while serving media: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "failed to read media" })),
                )
                    .into_response()
            }
        }
    }
}
