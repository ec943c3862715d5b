//! Unified error type for the reporting engine and its adapters.
//!
//! Degenerate denominators are never errors (they resolve to `0`), and empty
//! classification or ranking results are valid outputs. The only failure the
//! engine itself raises is a request for an unknown grouping dimension.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Engine
    // ---------------------------
    #[error("Unknown grouping key: {0} (expected training, category, site or month)")]
    UnknownGroupingKey(String),

    #[error("Data generation error: {0}")]
    Generator(String),

    // ---------------------------
    // Config
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ReportResult<T> = Result<T, ReportError>;
