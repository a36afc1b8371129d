//! Batch request model: uploaded files, target specification, and per-file
//! conversion results.

use super::format::{ConversionMode, OutputFormat};
use std::path::{Path, PathBuf};

/// One received file, already materialized to temporary storage by the
/// upload layer. The path is owned exclusively by the current request and
/// deleted by the janitor when the request finishes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub temp_path: PathBuf,
    /// Client-declared filename. Untrusted; used for display and extension
    /// fallback only.
    pub declared_name: String,
    /// Client-declared MIME type. Untrusted; only the PDF pre-filter
    /// consults it.
    pub declared_mime: String,
    pub size_bytes: u64,
}

impl UploadedFile {
    /// Filename without its final extension, for deriving output names.
    pub fn base_name(&self) -> String {
        let name = Path::new(&self.declared_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.declared_name);
        match name.rsplit_once('.') {
            Some((base, _)) if !base.is_empty() => base.to_string(),
            _ => name.to_string(),
        }
    }

    /// Whether the declared metadata marks this as a PDF: MIME type
    /// `application/pdf` or a case-insensitive `.pdf` name suffix.
    pub fn declared_as_pdf(&self) -> bool {
        self.declared_mime.eq_ignore_ascii_case("application/pdf")
            || self.declared_name.to_lowercase().ends_with(".pdf")
    }
}

/// The requested operation for a batch.
#[derive(Debug, Clone, Copy)]
pub struct TargetSpec {
    pub mode: ConversionMode,
    pub output_format: OutputFormat,
}

/// One output file produced by a transformation.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Outcome of transforming one uploaded file.
#[derive(Debug)]
pub enum Outcome {
    /// One or more output artifacts (PdfToImages yields one per page).
    Success { artifacts: Vec<Artifact> },
    Failure { reason: String },
}

/// Result of transforming one file, tagged with its submission position so
/// parallel execution can be sorted back into original order.
#[derive(Debug)]
pub struct ConversionResult {
    pub original_index: usize,
    pub source_name: String,
    pub outcome: Outcome,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

/// Aggregate view over a batch's results.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub successes: usize,
    pub failures: usize,
}

impl BatchOutcome {
    pub fn tally(results: &[ConversionResult]) -> Self {
        let successes = results.iter().filter(|r| r.is_success()).count();
        BatchOutcome {
            successes,
            failures: results.len() - successes,
        }
    }
}
