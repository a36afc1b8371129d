//! PdfToImages endpoint: rasterize PDF pages into images.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Response;
use fileforge_core::ConversionMode;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Rasterize every page of each uploaded PDF into the requested image
/// format (default PNG).
#[tracing::instrument(skip(state, multipart), fields(operation = "pdf_to_images"))]
pub async fn pdf_to_images(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    super::run_per_file_mode(state, ConversionMode::PdfToImages, multipart).await
}
