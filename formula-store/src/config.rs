//! Runtime configuration for the formula corpus.

use std::path::PathBuf;

use crate::errors::FormulaError;

/// Default corpus directory, relative to the working directory.
pub const DEFAULT_FORMULAS_DIR: &str = "formulas";

/// Where the formula documents live.
#[derive(Clone, Debug)]
pub struct CorpusConfig {
    /// Directory holding `length.txt`, `temperature.txt`, ...
    pub dir: PathBuf,
}

impl CorpusConfig {
    /// Creates a config for an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), FormulaError> {
        if self.dir.as_os_str().is_empty() {
            return Err(FormulaError::Config("formulas dir is empty".into()));
        }
        Ok(())
    }
}
