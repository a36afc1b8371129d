//! Batch orchestration.
//!
//! Files are processed in fixed-size concurrent chunks to bound peak memory
//! and codec pressure. Results carry the submission index and are re-sorted
//! before returning, so callers always observe input order. Cancellation is
//! checked between chunks; an aborted request still flows through the
//! janitor's cleanup.

use fileforge_core::{AppError, ConversionResult, TargetSpec, UploadedFile};
use lopdf::Document;
use tokio_util::sync::CancellationToken;

use crate::cache::DecodeCache;
use crate::pdf::merge::merge_documents;
use crate::transform::{
    combine_contribution, transform_file, CombineContribution, TransformContext,
};

/// Orchestration knobs, sourced from configuration.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Files processed concurrently within one chunk.
    pub concurrency: usize,
    /// Longest-side bound for rasterized PDF pages, in pixels.
    pub raster_max_dimension: u32,
}

/// Run the per-file transform across the batch.
///
/// Returns one result per accepted file, in submission order, with
/// `successes + failures == files.len()`.
pub async fn process_batch(
    files: &[UploadedFile],
    target: &TargetSpec,
    cache: &DecodeCache,
    options: &BatchOptions,
    cancel: &CancellationToken,
) -> Result<Vec<ConversionResult>, AppError> {
    let ctx = TransformContext {
        cache,
        raster_max_dimension: options.raster_max_dimension,
        single_input: files.len() == 1,
    };
    let chunk_size = options.concurrency.max(1);

    let mut results: Vec<ConversionResult> = Vec::with_capacity(files.len());
    for chunk in files.iter().enumerate().collect::<Vec<_>>().chunks(chunk_size) {
        if cancel.is_cancelled() {
            tracing::info!("Batch processing cancelled");
            return Err(AppError::Cancelled);
        }

        let tasks = chunk.iter().map(|(index, file)| {
            let ctx = &ctx;
            async move {
                let outcome = transform_file(file, target, ctx).await;
                ConversionResult {
                    original_index: *index,
                    source_name: file.declared_name.clone(),
                    outcome,
                }
            }
        });

        results.extend(futures::future::join_all(tasks).await);
    }

    // Chunks already arrive in order; the sort makes the guarantee
    // independent of how the chunking evolves
    results.sort_by_key(|r| r.original_index);
    Ok(results)
}

/// Merge the batch into one PDF, preserving submission order.
///
/// PDFs contribute their pages verbatim; raster images contribute one page
/// scaled into an A4 envelope. Unreadable or unsupported files are skipped
/// with a warning; a batch where every file is skipped fails with
/// `NoValidContent`.
pub async fn combine_batch(
    files: &[UploadedFile],
    cache: &DecodeCache,
    options: &BatchOptions,
    cancel: &CancellationToken,
) -> Result<Vec<u8>, AppError> {
    let ctx = TransformContext {
        cache,
        raster_max_dimension: options.raster_max_dimension,
        single_input: files.len() == 1,
    };
    let chunk_size = options.concurrency.max(1);

    // Gather contributions concurrently, indexed so the merge below can
    // honor submission order
    let mut contributions: Vec<(usize, CombineContribution)> = Vec::with_capacity(files.len());
    for chunk in files.iter().enumerate().collect::<Vec<_>>().chunks(chunk_size) {
        if cancel.is_cancelled() {
            tracing::info!("Combine cancelled");
            return Err(AppError::Cancelled);
        }

        let tasks = chunk.iter().map(|(index, file)| {
            let ctx = &ctx;
            async move {
                match combine_contribution(file, ctx).await {
                    Ok(contribution) => (*index, contribution),
                    Err(e) => {
                        tracing::warn!(
                            name = %file.declared_name,
                            error = %e,
                            "Skipping unreadable file in combine"
                        );
                        (*index, CombineContribution::Skipped)
                    }
                }
            }
        });
        contributions.extend(futures::future::join_all(tasks).await);
    }
    contributions.sort_by_key(|(index, _)| *index);

    let mut documents = Vec::new();
    for (index, contribution) in contributions {
        let bytes = match contribution {
            CombineContribution::Document(bytes) | CombineContribution::ImagePage(bytes) => bytes,
            CombineContribution::Skipped => continue,
        };
        match Document::load_mem(&bytes) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                tracing::warn!(
                    name = %files[index].declared_name,
                    error = %e,
                    "Skipping unparsable PDF in combine"
                );
            }
        }
    }

    if documents.is_empty() {
        return Err(AppError::NoValidContent(
            "No file in the batch contributed any pages".to_string(),
        ));
    }

    merge_documents(documents).map_err(|e| AppError::InternalWithSource {
        message: "Failed to merge PDF documents".to_string(),
        source: e,
    })
}
