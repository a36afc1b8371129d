//! Error types module
//!
//! This module provides the core error types used throughout the Fileforge
//! application. All errors are unified under the `AppError` enum which can
//! represent rejection, per-item, aggregate, and infrastructure errors.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like partially failed batches
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "EMPTY_BATCH")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Empty batch: {0}")]
    EmptyBatch(String),

    #[error("Invalid output format: {0}")]
    InvalidFormat(String),

    #[error("No matching files: {0}")]
    NoMatchingFiles(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Too many files: {0}")]
    TooManyFiles(String),

    #[error("No valid content: {0}")]
    NoValidContent(String),

    #[error("All items failed: {failed} of {total} files failed to process")]
    AllItemsFailed { failed: usize, total: usize },

    #[error("Archive packaging error: {0}")]
    Archive(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

// Error conversion implementations following Rust best practices
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::EmptyBatch(_) => (
            400,
            "EMPTY_BATCH",
            false,
            Some("Attach at least one file to the request"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidFormat(_) => (
            400,
            "INVALID_FORMAT",
            false,
            Some("Choose an output format from the listed allow-list"),
            false,
            LogLevel::Debug,
        ),
        AppError::NoMatchingFiles(_) => (
            400,
            "NO_MATCHING_FILES",
            false,
            Some("Attach at least one PDF file"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size and retry"),
            false,
            LogLevel::Debug,
        ),
        AppError::TooManyFiles(_) => (
            400,
            "TOO_MANY_FILES",
            false,
            Some("Split the batch into smaller requests"),
            false,
            LogLevel::Debug,
        ),
        AppError::NoValidContent(_) => (
            422,
            "NO_VALID_CONTENT",
            false,
            Some("Attach at least one PDF or supported image"),
            false,
            LogLevel::Warn,
        ),
        AppError::AllItemsFailed { .. } => (
            422,
            "ALL_ITEMS_FAILED",
            false,
            Some("Check the files are readable and in a supported format"),
            false,
            LogLevel::Warn,
        ),
        AppError::Archive(_) => (
            500,
            "ARCHIVE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Conversion(_) => (
            422,
            "CONVERSION_ERROR",
            false,
            Some("Check the file format and try a different file"),
            false,
            LogLevel::Warn,
        ),
        AppError::Cancelled => (
            499,
            "CANCELLED",
            true,
            Some("Retry the request"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::EmptyBatch(_) => "EmptyBatch",
            AppError::InvalidFormat(_) => "InvalidFormat",
            AppError::NoMatchingFiles(_) => "NoMatchingFiles",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::TooManyFiles(_) => "TooManyFiles",
            AppError::NoValidContent(_) => "NoValidContent",
            AppError::AllItemsFailed { .. } => "AllItemsFailed",
            AppError::Archive(_) => "Archive",
            AppError::Conversion(_) => "Conversion",
            AppError::Cancelled => "Cancelled",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        // Add source error chain
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::EmptyBatch(ref msg) => msg.clone(),
            AppError::InvalidFormat(ref msg) => msg.clone(),
            AppError::NoMatchingFiles(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::TooManyFiles(ref msg) => msg.clone(),
            AppError::NoValidContent(ref msg) => msg.clone(),
            AppError::AllItemsFailed { failed, total } => {
                format!("All items failed: {} of {} files failed to process", failed, total)
            }
            AppError::Archive(_) => "Failed to package results".to_string(),
            AppError::Conversion(ref msg) => msg.clone(),
            AppError::Cancelled => "Request cancelled".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
