//! Fileforge Core Library
//!
//! This crate provides the domain model, error types, and configuration
//! shared across all Fileforge components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::batch::{Artifact, BatchOutcome, ConversionResult, Outcome, TargetSpec, UploadedFile};
pub use models::format::{ConversionMode, OutputFormat, SourceKind};
pub use models::sniff::sniff_source_kind;
