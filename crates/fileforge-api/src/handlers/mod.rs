//! Request handlers for the four conversion operations plus health/stats.

pub mod combine;
pub mod convert;
pub mod health;
pub mod pdf_to_images;
pub mod pdf_to_word;
pub mod stats;

use std::sync::Arc;

use axum::extract::Multipart;
use axum::response::Response;
use fileforge_core::{BatchOutcome, ConversionMode, TargetSpec, UploadedFile};
use fileforge_processing::{
    process_batch, ArtifactLedger, BatchOptions, BatchValidator,
};

use crate::error::HttpAppError;
use crate::packager::package_results;
use crate::state::AppState;
use crate::stats::StatsEvent;
use crate::utils::upload::extract_multipart_batch;

/// Shared request flow for the per-file modes (Convert, PdfToWord,
/// PdfToImages): extract, validate, process, package.
///
/// The janitor ledger is created here and cleaned on every exit path; the
/// `Drop` impl backstops early returns.
pub(crate) async fn run_per_file_mode(
    state: Arc<AppState>,
    mode: ConversionMode,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let ledger = ArtifactLedger::new();
    let result = per_file_inner(&state, mode, multipart, &ledger).await;
    ledger.cleanup_all();
    result
}

async fn per_file_inner(
    state: &AppState,
    mode: ConversionMode,
    multipart: Multipart,
    ledger: &ArtifactLedger,
) -> Result<Response, HttpAppError> {
    let (files, target) = accept_batch(state, mode, multipart, ledger).await?;

    let options = batch_options(state);
    let cancel = state.shutdown.child_token();
    let results = process_batch(&files, &target, &state.decode_cache, &options, &cancel).await?;

    let tally = BatchOutcome::tally(&results);
    tracing::info!(
        mode = mode.as_str(),
        total = results.len(),
        successes = tally.successes,
        failures = tally.failures,
        "Batch processed"
    );
    state.stats.record(StatsEvent {
        mode,
        successes: tally.successes,
        failures: tally.failures,
    });

    let payload = package_results(mode, results, files.len())?;
    Ok(axum::response::IntoResponse::into_response(payload))
}

/// Extract and validate the batch: multipart fields, target format against
/// the mode's allow-list, batch shape, and the PDF pre-filter.
pub(crate) async fn accept_batch(
    state: &AppState,
    mode: ConversionMode,
    multipart: Multipart,
    ledger: &ArtifactLedger,
) -> Result<(Vec<UploadedFile>, TargetSpec), HttpAppError> {
    let extracted = extract_multipart_batch(multipart, &state.config, ledger).await?;

    let target =
        fileforge_processing::resolve_target(mode, extracted.output_format.as_deref())?;

    let validator = BatchValidator::new(
        state.config.max_file_size_bytes as u64,
        state.config.max_files_per_batch,
        state.config.combine_max_total_bytes as u64,
    );
    let files = validator.validate(mode, extracted.files)?;

    Ok((files, target))
}

pub(crate) fn batch_options(state: &AppState) -> BatchOptions {
    BatchOptions {
        concurrency: state.config.batch_concurrency,
        raster_max_dimension: state.config.raster_max_dimension,
    }
}
