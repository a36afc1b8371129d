//! Result packaging: decide between a bare file response and a ZIP archive.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use fileforge_core::{AppError, Artifact, BatchOutcome, ConversionMode, ConversionResult, Outcome};
use fileforge_processing::archive::build_zip;

/// The HTTP-bound payload for a successful conversion request.
#[derive(Debug)]
pub struct Payload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Payload {
    /// A single merged or converted file, streamed bare.
    pub fn single(artifact: Artifact) -> Self {
        Self {
            filename: artifact.name,
            content_type: artifact.content_type.to_string(),
            bytes: artifact.bytes,
        }
    }
}

impl IntoResponse for Payload {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        let headers = [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_str(&self.content_type)
                    .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
            ),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            ),
        ];
        (StatusCode::OK, headers, self.bytes).into_response()
    }
}

/// Package ordered per-file results into the response payload.
///
/// A single-input batch that produced exactly one artifact is returned bare.
/// Everything else is a ZIP whose entries are the successful artifacts plus
/// an `ERROR_<originalName>.txt` entry per failed item, so the client is
/// never silently missing a file. Zero successes fail the whole request.
pub fn package_results(
    mode: ConversionMode,
    results: Vec<ConversionResult>,
    batch_size: usize,
) -> Result<Payload, AppError> {
    let outcome = BatchOutcome::tally(&results);
    if outcome.successes == 0 {
        return Err(AppError::AllItemsFailed {
            failed: outcome.failures,
            total: results.len(),
        });
    }

    // Decide bare-vs-zip before touching any bytes, so the bare path and
    // the archive path each move every artifact exactly once
    let artifact_count: usize = results
        .iter()
        .map(|r| match &r.outcome {
            Outcome::Success { artifacts } => artifacts.len(),
            Outcome::Failure { .. } => 0,
        })
        .sum();

    if batch_size == 1 && artifact_count == 1 && outcome.failures == 0 {
        let artifact = results
            .into_iter()
            .find_map(|r| match r.outcome {
                Outcome::Success { artifacts } => artifacts.into_iter().next(),
                Outcome::Failure { .. } => None,
            })
            .expect("one artifact counted");
        return Ok(Payload::single(artifact));
    }

    let mut entries: Vec<(String, Vec<u8>)> = Vec::new();
    for result in results {
        match result.outcome {
            Outcome::Success { artifacts } => {
                for artifact in artifacts {
                    entries.push((artifact.name, artifact.bytes));
                }
            }
            Outcome::Failure { reason } => {
                entries.push((
                    format!("ERROR_{}.txt", result.source_name),
                    reason.into_bytes(),
                ));
            }
        }
    }

    let bytes = build_zip(&entries).map_err(|e| AppError::Archive(e.to_string()))?;
    Ok(Payload {
        filename: format!("{}_results.zip", mode.as_str().replace('-', "_")),
        content_type: "application/zip".to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(index: usize, name: &str, artifact_names: &[&str]) -> ConversionResult {
        ConversionResult {
            original_index: index,
            source_name: name.to_string(),
            outcome: Outcome::Success {
                artifacts: artifact_names
                    .iter()
                    .map(|n| Artifact {
                        name: n.to_string(),
                        bytes: vec![1, 2, 3],
                        content_type: "image/png",
                    })
                    .collect(),
            },
        }
    }

    fn failure(index: usize, name: &str, reason: &str) -> ConversionResult {
        ConversionResult {
            original_index: index,
            source_name: name.to_string(),
            outcome: Outcome::Failure {
                reason: reason.to_string(),
            },
        }
    }

    fn zip_entry_names(data: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_single_input_single_artifact_is_bare() {
        let payload = package_results(
            ConversionMode::Convert,
            vec![success(0, "photo.png", &["photo.jpg"])],
            1,
        )
        .unwrap();
        assert_eq!(payload.filename, "photo.jpg");
        assert_eq!(payload.content_type, "image/png");
    }

    #[test]
    fn test_multi_file_batch_is_zip_with_error_entries() {
        let payload = package_results(
            ConversionMode::Convert,
            vec![
                success(0, "a.png", &["a.jpg"]),
                failure(1, "b.png", "'b.png': decode failed"),
            ],
            2,
        )
        .unwrap();
        assert_eq!(payload.content_type, "application/zip");
        let names = zip_entry_names(&payload.bytes);
        assert_eq!(names, vec!["a.jpg", "ERROR_b.png.txt"]);
    }

    #[test]
    fn test_single_input_multiple_artifacts_is_zip() {
        // Multi-page PdfToImages on one input
        let payload = package_results(
            ConversionMode::PdfToImages,
            vec![success(0, "doc.pdf", &["doc_page_1.png", "doc_page_2.png"])],
            1,
        )
        .unwrap();
        assert_eq!(payload.content_type, "application/zip");
        assert_eq!(payload.filename, "pdf_to_images_results.zip");
        assert_eq!(
            zip_entry_names(&payload.bytes),
            vec!["doc_page_1.png", "doc_page_2.png"]
        );
    }

    #[test]
    fn test_bare_payload_carries_artifact_bytes_unchanged() {
        let payload = package_results(
            ConversionMode::Convert,
            vec![ConversionResult {
                original_index: 0,
                source_name: "photo.png".to_string(),
                outcome: Outcome::Success {
                    artifacts: vec![Artifact {
                        name: "photo.jpg".to_string(),
                        bytes: vec![9, 8, 7, 6],
                        content_type: "image/jpeg",
                    }],
                },
            }],
            1,
        )
        .unwrap();
        assert_eq!(payload.bytes, vec![9, 8, 7, 6]);
        assert_eq!(payload.content_type, "image/jpeg");
    }

    #[test]
    fn test_zero_successes_is_aggregate_error() {
        let err = package_results(
            ConversionMode::Convert,
            vec![failure(0, "a.png", "bad"), failure(1, "b.png", "bad")],
            2,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::AllItemsFailed {
                failed: 2,
                total: 2
            }
        ));
    }
}
