//! Fire-and-forget usage counters.
//!
//! Handlers send events into an unbounded channel and never wait for the
//! outcome; a detached consumer task folds events into atomic counters. A
//! full or closed channel is logged and otherwise ignored, so stats can
//! never block or fail a conversion.

use fileforge_core::ConversionMode;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One completed conversion request.
#[derive(Debug)]
pub struct StatsEvent {
    pub mode: ConversionMode,
    pub successes: usize,
    pub failures: usize,
}

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    files_converted: AtomicU64,
    files_failed: AtomicU64,
    // Indexed by mode_index()
    requests_by_mode: [AtomicU64; 4],
}

fn mode_index(mode: ConversionMode) -> usize {
    match mode {
        ConversionMode::Convert => 0,
        ConversionMode::Combine => 1,
        ConversionMode::PdfToWord => 2,
        ConversionMode::PdfToImages => 3,
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Serialize)]
pub struct StatsSnapshot {
    pub requests: u64,
    pub files_converted: u64,
    pub files_failed: u64,
    pub convert_requests: u64,
    pub combine_requests: u64,
    pub pdf_to_word_requests: u64,
    pub pdf_to_images_requests: u64,
}

/// Detached stats collector.
#[derive(Clone)]
pub struct StatsSink {
    tx: mpsc::UnboundedSender<StatsEvent>,
    counters: Arc<Counters>,
}

impl StatsSink {
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<StatsEvent>();
        let counters = Arc::new(Counters::default());

        let consumer = counters.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                consumer.requests.fetch_add(1, Ordering::Relaxed);
                consumer
                    .files_converted
                    .fetch_add(event.successes as u64, Ordering::Relaxed);
                consumer
                    .files_failed
                    .fetch_add(event.failures as u64, Ordering::Relaxed);
                consumer.requests_by_mode[mode_index(event.mode)]
                    .fetch_add(1, Ordering::Relaxed);
            }
        });

        Self { tx, counters }
    }

    /// Record an event without waiting. Send failures are logged, never
    /// surfaced to the caller.
    pub fn record(&self, event: StatsEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!(error = %e, "Stats sink unavailable, dropping event");
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests: self.counters.requests.load(Ordering::Relaxed),
            files_converted: self.counters.files_converted.load(Ordering::Relaxed),
            files_failed: self.counters.files_failed.load(Ordering::Relaxed),
            convert_requests: self.counters.requests_by_mode[0].load(Ordering::Relaxed),
            combine_requests: self.counters.requests_by_mode[1].load(Ordering::Relaxed),
            pdf_to_word_requests: self.counters.requests_by_mode[2].load(Ordering::Relaxed),
            pdf_to_images_requests: self.counters.requests_by_mode[3].load(Ordering::Relaxed),
        }
    }
}

impl Default for StatsSink {
    fn default() -> Self {
        Self::new()
    }
}
