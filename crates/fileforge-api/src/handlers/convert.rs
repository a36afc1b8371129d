//! Convert endpoint: per-file raster re-encode or image-to-PDF.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Response;
use fileforge_core::ConversionMode;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Convert each uploaded file to the requested output format.
///
/// `output_format` is required for this mode; there is no default.
#[tracing::instrument(skip(state, multipart), fields(operation = "convert"))]
pub async fn convert(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    super::run_per_file_mode(state, ConversionMode::Convert, multipart).await
}
