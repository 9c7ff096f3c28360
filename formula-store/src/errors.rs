//! Unified error types for the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for formula-store operations.
///
/// Directory scans never surface these; they log and degrade to an empty
/// corpus. Only single-document reads and config validation return them.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// I/O error while reading a specific document.
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A category label that matches none of the eight domains.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
