//! PdfToWord endpoint: PDF text extraction into .docx documents.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Response;
use fileforge_core::ConversionMode;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Extract text from each uploaded PDF into a Word document.
#[tracing::instrument(skip(state, multipart), fields(operation = "pdf_to_word"))]
pub async fn pdf_to_word(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    super::run_per_file_mode(state, ConversionMode::PdfToWord, multipart).await
}
