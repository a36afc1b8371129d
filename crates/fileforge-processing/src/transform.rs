//! Per-file transformation.
//!
//! Every codec failure is caught here and converted into
//! `Outcome::Failure` so one bad file never aborts its batch-mates. The
//! caller tags outcomes with the submission index.

use std::sync::Arc;

use fileforge_core::{
    Artifact, ConversionMode, Outcome, OutputFormat, SourceKind, TargetSpec, UploadedFile,
    sniff_source_kind,
};
use image::DynamicImage;

use crate::cache::{DecodeCache, Fingerprint};
use crate::image::{ImageOrientation, ImageTransformer};
use crate::pdf::page_builder::{image_to_pdf, PageFit};
use crate::pdf::raster::rasterize_pdf;
use crate::pdf::text::extract_paragraphs;

/// Request-level inputs the per-file transform needs beyond the file itself.
pub struct TransformContext<'a> {
    pub cache: &'a DecodeCache,
    pub raster_max_dimension: u32,
    /// Whether the batch contains exactly one file (affects output naming).
    pub single_input: bool,
}

/// Transform one file according to the target spec.
///
/// Never returns an error: every failure becomes `Outcome::Failure` with a
/// human-readable reason naming the file.
pub async fn transform_file(
    file: &UploadedFile,
    target: &TargetSpec,
    ctx: &TransformContext<'_>,
) -> Outcome {
    let result = match target.mode {
        ConversionMode::Convert => convert_one(file, target.output_format, ctx).await,
        ConversionMode::PdfToWord => pdf_to_word(file).await,
        ConversionMode::PdfToImages => pdf_to_images(file, target.output_format, ctx).await,
        // Combine contributions are merged by the orchestrator, not here
        ConversionMode::Combine => {
            return Outcome::Failure {
                reason: format!(
                    "'{}': combine is handled by the batch merger",
                    file.declared_name
                ),
            }
        }
    };

    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(
                name = %file.declared_name,
                mode = target.mode.as_str(),
                error = %e,
                "File transformation failed"
            );
            Outcome::Failure {
                reason: format!("'{}': {e:#}", file.declared_name),
            }
        }
    }
}

/// Decode a source image and normalize its orientation, memoized across
/// requests by weak fingerprint.
pub fn decode_normalized(
    cache: &DecodeCache,
    file: &UploadedFile,
    data: &[u8],
) -> anyhow::Result<Arc<DynamicImage>> {
    let key = Fingerprint::new(&file.temp_path, file.size_bytes);
    cache.get_or_decode(key, || {
        let decoded = ImageTransformer::decode(data)?;
        Ok(ImageOrientation::apply_exif_orientation(decoded, data))
    })
}

async fn convert_one(
    file: &UploadedFile,
    format: OutputFormat,
    ctx: &TransformContext<'_>,
) -> anyhow::Result<Outcome> {
    let data = tokio::fs::read(&file.temp_path).await?;
    let source = sniff_source_kind(&data, &file.declared_name);

    if !source.is_raster() {
        return Ok(Outcome::Failure {
            reason: format!(
                "'{}': unsupported conversion from {} to {}",
                file.declared_name,
                source.as_str(),
                format.extension()
            ),
        });
    }

    let image = decode_normalized(ctx.cache, file, &data)?;

    let (bytes, content_type) = if format == OutputFormat::Pdf {
        (image_to_pdf(&image, PageFit::Natural)?, format.to_mime_type())
    } else {
        (ImageTransformer::encode(&image, format)?, format.to_mime_type())
    };

    Ok(Outcome::Success {
        artifacts: vec![Artifact {
            name: format!("{}.{}", file.base_name(), format.extension()),
            bytes,
            content_type,
        }],
    })
}

async fn pdf_to_word(file: &UploadedFile) -> anyhow::Result<Outcome> {
    let data = tokio::fs::read(&file.temp_path).await?;
    let extraction = extract_paragraphs(&data)?;

    if extraction.is_empty() {
        return Ok(Outcome::Failure {
            reason: format!("'{}': no extractable text", file.declared_name),
        });
    }

    let bytes = crate::docx::paragraphs_to_docx(&extraction.paragraphs)?;
    Ok(Outcome::Success {
        artifacts: vec![Artifact {
            name: format!("{}.docx", file.base_name()),
            bytes,
            content_type: OutputFormat::Docx.to_mime_type(),
        }],
    })
}

async fn pdf_to_images(
    file: &UploadedFile,
    format: OutputFormat,
    ctx: &TransformContext<'_>,
) -> anyhow::Result<Outcome> {
    let data = tokio::fs::read(&file.temp_path).await?;

    let pages = match rasterize_pdf(data.clone(), ctx.raster_max_dimension).await {
        Ok(Some(pages)) if !pages.is_empty() => pages,
        Ok(Some(_)) => {
            return Ok(Outcome::Failure {
                reason: format!("'{}': PDF contains no pages", file.declared_name),
            })
        }
        Ok(None) => return degraded_text_artifact(file, &data, "rasterization unavailable"),
        Err(e) => {
            tracing::warn!(
                name = %file.declared_name,
                error = %e,
                "Rasterization failed, falling back to text extraction"
            );
            return degraded_text_artifact(file, &data, "rasterization failed");
        }
    };

    let single_page = pages.len() == 1;
    let mut artifacts = Vec::with_capacity(pages.len());
    for page in pages {
        let bytes = ImageTransformer::encode(&page.image, format)?;
        let name = if single_page && ctx.single_input {
            format!("{}.{}", file.base_name(), format.extension())
        } else {
            format!("{}_page_{}.{}", file.base_name(), page.index + 1, format.extension())
        };
        artifacts.push(Artifact {
            name,
            bytes,
            content_type: format.to_mime_type(),
        });
    }

    Ok(Outcome::Success { artifacts })
}

/// Degraded success for PdfToImages when pages cannot be rendered: a plain
/// text file with the extracted text and a note saying why.
fn degraded_text_artifact(
    file: &UploadedFile,
    data: &[u8],
    cause: &str,
) -> anyhow::Result<Outcome> {
    let extraction = extract_paragraphs(data)?;
    let mut body = format!(
        "Page images could not be produced for '{}' ({cause}).\n\
         The document's text content follows.\n\n",
        file.declared_name
    );
    body.push_str(&extraction.paragraphs.join("\n\n"));

    Ok(Outcome::Success {
        artifacts: vec![Artifact {
            name: format!("{}.txt", file.base_name()),
            bytes: body.into_bytes(),
            content_type: "text/plain",
        }],
    })
}

/// What a file contributes to a Combine merge.
pub enum CombineContribution {
    /// PDF bytes whose pages are copied verbatim.
    Document(Vec<u8>),
    /// A raster image embedded as a single page, scaled into an A4 envelope.
    ImagePage(Vec<u8>),
    /// Neither a PDF nor a supported image; skipped with a warning.
    Skipped,
}

/// Classify one file for the Combine merger.
pub async fn combine_contribution(
    file: &UploadedFile,
    ctx: &TransformContext<'_>,
) -> anyhow::Result<CombineContribution> {
    let data = tokio::fs::read(&file.temp_path).await?;
    match sniff_source_kind(&data, &file.declared_name) {
        SourceKind::Pdf => Ok(CombineContribution::Document(data)),
        kind if kind.is_raster() => {
            let image = decode_normalized(ctx.cache, file, &data)?;
            let page = image_to_pdf(&image, PageFit::A4Envelope)?;
            Ok(CombineContribution::ImagePage(page))
        }
        kind => {
            tracing::warn!(
                name = %file.declared_name,
                kind = kind.as_str(),
                "Skipping unsupported file in combine"
            );
            Ok(CombineContribution::Skipped)
        }
    }
}
