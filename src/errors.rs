/*!
 * Error types for the moddict application.
 *
 * This module contains custom error types for the different layers of the
 * analysis engine, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while reading from a translation store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying query failed
    #[error("Failed to read from translation store: {0}")]
    ReadFailed(String),

    /// A stored row could not be mapped into a domain value
    #[error("Invalid stored value in {field}: {value}")]
    InvalidValue {
        /// Column or field the value came from
        field: &'static str,
        /// The offending raw value
        value: String,
    },
}

impl From<anyhow::Error> for StoreError {
    fn from(error: anyhow::Error) -> Self {
        Self::ReadFailed(format!("{:#}", error))
    }
}

/// A term scope string without a recognizable prefix
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized term scope: '{0}'")]
pub struct ScopeParseError(pub String);

/// Errors that abort an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The corpus snapshot could not be loaded
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors that can occur while rendering a report
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON serialization failed
    #[error("Failed to serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer could not be flushed into a buffer
    #[error("Failed to finish CSV report: {0}")]
    Buffer(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the analysis engine
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Error from report rendering
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
