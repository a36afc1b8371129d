//! Combine endpoint: merge the whole batch into one PDF.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use fileforge_core::ConversionMode;
use fileforge_processing::{combine_batch, ArtifactLedger};

use crate::error::HttpAppError;
use crate::packager::Payload;
use crate::state::AppState;
use crate::stats::StatsEvent;

/// Merge all uploaded files into a single PDF, in submission order.
///
/// PDFs contribute their pages; raster images become one page each, scaled
/// into an A4 envelope.
#[tracing::instrument(skip(state, multipart), fields(operation = "combine"))]
pub async fn combine(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let ledger = ArtifactLedger::new();
    let result = combine_inner(&state, multipart, &ledger).await;
    ledger.cleanup_all();
    result
}

async fn combine_inner(
    state: &AppState,
    multipart: Multipart,
    ledger: &ArtifactLedger,
) -> Result<Response, HttpAppError> {
    let (files, _target) =
        super::accept_batch(state, ConversionMode::Combine, multipart, ledger).await?;

    let options = super::batch_options(state);
    let cancel = state.shutdown.child_token();
    let merged = combine_batch(&files, &state.decode_cache, &options, &cancel).await?;

    tracing::info!(inputs = files.len(), bytes = merged.len(), "Batch combined");
    state.stats.record(StatsEvent {
        mode: ConversionMode::Combine,
        successes: 1,
        failures: 0,
    });

    let payload = Payload {
        filename: "combined.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        bytes: merged,
    };
    Ok(payload.into_response())
}
