//! Common utilities for file upload handlers

use axum::extract::Multipart;
use fileforge_core::{AppError, Config, UploadedFile};
use fileforge_processing::ArtifactLedger;
use std::path::PathBuf;

/// A multipart batch materialized to temporary storage.
pub struct ExtractedBatch {
    pub files: Vec<UploadedFile>,
    pub output_format: Option<String>,
}

/// Extract the file batch and the `output_format` field from multipart form
/// data.
///
/// Every received file is written to scratch storage and registered with the
/// janitor immediately, so even files a later validation step rejects get
/// cleaned up. Accepts file fields named `files` (repeated) or `file`.
pub async fn extract_multipart_batch(
    mut multipart: Multipart,
    config: &Config,
    ledger: &ArtifactLedger,
) -> Result<ExtractedBatch, AppError> {
    let mut files = Vec::new();
    let mut output_format: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "files" | "file" => {
                let declared_name = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let declared_mime = field
                    .content_type()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                let declared_name = sanitize_filename(&declared_name)?;
                let temp_path = scratch_path(config);
                ledger.register(&temp_path);
                tokio::fs::write(&temp_path, &data).await?;

                files.push(UploadedFile {
                    temp_path,
                    declared_name,
                    declared_mime,
                    size_bytes: data.len() as u64,
                });
            }
            "output_format" => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read output_format: {}", e))
                })?;
                output_format = Some(value.trim().to_string());
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(ExtractedBatch {
        files,
        output_format,
    })
}

fn scratch_path(config: &Config) -> PathBuf {
    PathBuf::from(&config.scratch_dir).join(format!("fileforge-{}", uuid::Uuid::new_v4()))
}

/// Sanitize filename to prevent path traversal and invalid characters.
/// Returns an error if the filename contains path traversal attempts.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}
