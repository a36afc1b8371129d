//! Fileforge Processing Library
//!
//! The batch conversion pipeline: input validation, per-file transformation,
//! batch orchestration, result packaging, and temporary-artifact cleanup.
//! All codec work (image decode/encode, PDF parsing, DOCX generation, ZIP
//! packaging) is delegated to third-party libraries; this crate contributes
//! orchestration, error aggregation, and file lifecycle bookkeeping.

pub mod archive;
pub mod batch;
pub mod cache;
pub mod docx;
pub mod image;
pub mod janitor;
pub mod pdf;
pub mod transform;
pub mod validator;

pub use batch::{combine_batch, process_batch, BatchOptions};
pub use cache::DecodeCache;
pub use janitor::ArtifactLedger;
pub use transform::transform_file;
pub use validator::{resolve_target, BatchValidator, ValidationError};
