//! Usage stats endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::state::AppState;
use crate::stats::StatsSnapshot;

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}
