//! Application state shared across handlers.

use fileforge_core::Config;
use fileforge_processing::DecodeCache;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::stats::StatsSink;

/// Shared state: configuration, the decode cache, the stats sink, and the
/// root cancellation token.
///
/// The decode cache is the only cross-request mutable state in the pipeline.
/// The shutdown token is the parent of every per-request token, so a server
/// shutdown aborts in-flight batches between chunks.
pub struct AppState {
    pub config: Config,
    pub decode_cache: Arc<DecodeCache>,
    pub stats: StatsSink,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let decode_cache = Arc::new(DecodeCache::new(config.decode_cache_entries));
        Arc::new(Self {
            config,
            decode_cache,
            stats: StatsSink::new(),
            shutdown: CancellationToken::new(),
        })
    }
}
