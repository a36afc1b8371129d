//! Batch input validation.
//!
//! Everything here runs before any file is read: target format resolution
//! against the per-mode allow-list, batch shape checks, and the PDF
//! pre-filter for the pdf-only modes. A rejection leaves zero partial work
//! behind.

use fileforge_core::{ConversionMode, OutputFormat, TargetSpec, UploadedFile};

/// Validation errors for a batch request
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No files uploaded")]
    EmptyBatch,

    #[error("Invalid output format '{format}' for {mode} (allowed: {})", allowed.join(", "))]
    InvalidFormat {
        mode: &'static str,
        format: String,
        allowed: Vec<String>,
    },

    #[error("No PDF files in the batch; {mode} requires at least one PDF")]
    NoMatchingFiles { mode: &'static str },

    #[error("File '{name}' too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("Too many files: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("Combined input too large: {total} bytes (max: {max} bytes)")]
    BatchTooLarge { total: u64, max: u64 },
}

/// Resolve the requested output format against the mode's allow-list.
///
/// Fails fast with the full allow-list in the message, before any file is
/// touched.
pub fn resolve_target(
    mode: ConversionMode,
    raw_format: Option<&str>,
) -> Result<TargetSpec, ValidationError> {
    let allowed = || {
        mode.allowed_formats()
            .iter()
            .map(|f| f.extension().to_string())
            .collect::<Vec<_>>()
    };

    let output_format = match raw_format {
        Some(raw) => {
            let format = OutputFormat::parse(raw).map_err(|_| ValidationError::InvalidFormat {
                mode: mode.as_str(),
                format: raw.to_string(),
                allowed: allowed(),
            })?;
            if !mode.allowed_formats().contains(&format) {
                return Err(ValidationError::InvalidFormat {
                    mode: mode.as_str(),
                    format: raw.to_string(),
                    allowed: allowed(),
                });
            }
            format
        }
        None => match mode.default_format() {
            Some(format) => format,
            None => {
                return Err(ValidationError::InvalidFormat {
                    mode: mode.as_str(),
                    format: "<missing>".to_string(),
                    allowed: allowed(),
                })
            }
        },
    };

    Ok(TargetSpec {
        mode,
        output_format,
    })
}

/// Batch shape validator
///
/// Holds the boundary ceilings from configuration. The PDF pre-filter for
/// pdf-only modes discards non-matching files without generating per-item
/// failures; their temporary storage stays in the janitor's ledger and is
/// released at request end.
pub struct BatchValidator {
    max_file_size: u64,
    max_files: usize,
    combine_max_total: u64,
}

impl BatchValidator {
    pub fn new(max_file_size: u64, max_files: usize, combine_max_total: u64) -> Self {
        Self {
            max_file_size,
            max_files,
            combine_max_total,
        }
    }

    /// Validate the batch shape and apply the mode's file filter.
    ///
    /// Returns the accepted files in submission order. Filtered-out files
    /// are logged and dropped here, not failed.
    pub fn validate(
        &self,
        mode: ConversionMode,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<UploadedFile>, ValidationError> {
        if files.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        if files.len() > self.max_files {
            return Err(ValidationError::TooManyFiles {
                count: files.len(),
                max: self.max_files,
            });
        }

        for file in &files {
            if file.size_bytes > self.max_file_size {
                return Err(ValidationError::FileTooLarge {
                    name: file.declared_name.clone(),
                    size: file.size_bytes,
                    max: self.max_file_size,
                });
            }
        }

        if mode == ConversionMode::Combine {
            let total: u64 = files.iter().map(|f| f.size_bytes).sum();
            if total > self.combine_max_total {
                return Err(ValidationError::BatchTooLarge {
                    total,
                    max: self.combine_max_total,
                });
            }
        }

        if mode.pdf_only() {
            let (accepted, filtered): (Vec<_>, Vec<_>) =
                files.into_iter().partition(UploadedFile::declared_as_pdf);

            for file in &filtered {
                tracing::debug!(
                    name = %file.declared_name,
                    mime = %file.declared_mime,
                    mode = mode.as_str(),
                    "Skipping non-PDF file"
                );
            }

            if accepted.is_empty() {
                return Err(ValidationError::NoMatchingFiles {
                    mode: mode.as_str(),
                });
            }

            return Ok(accepted);
        }

        Ok(files)
    }
}
