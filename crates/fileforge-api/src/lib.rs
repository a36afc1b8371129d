//! Fileforge API Library
//!
//! HTTP surface for the batch conversion pipeline: multipart upload
//! extraction, the four operation endpoints, result packaging, and
//! application setup.

pub mod error;
pub mod handlers;
pub mod packager;
pub mod setup;
pub mod state;
pub mod stats;
pub mod telemetry;
pub mod utils;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
