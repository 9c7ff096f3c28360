//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use formula_store::CorpusConfig;

/// Files at least this large get a provider-refined answer instead of the
/// canned commands.
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 10_000_000;

/// Config bag for the chat pipeline. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct ContextorConfig {
    pub formulas_dir: PathBuf,
    pub large_file_threshold: u64,
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            formulas_dir: PathBuf::from(formula_store::DEFAULT_FORMULAS_DIR),
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
        }
    }
}

impl ContextorConfig {
    /// Build from environment variables with defaults.
    ///
    /// - `FORMULAS_DIR` (default `formulas`)
    /// - `LARGE_FILE_THRESHOLD_BYTES` (default `10000000`; unparsable values
    ///   fall back to the default)
    pub fn from_env() -> Self {
        Self {
            formulas_dir: PathBuf::from(env("FORMULAS_DIR", formula_store::DEFAULT_FORMULAS_DIR)),
            large_file_threshold: parse("LARGE_FILE_THRESHOLD_BYTES", DEFAULT_LARGE_FILE_THRESHOLD),
        }
    }

    pub fn corpus_config(&self) -> CorpusConfig {
        CorpusConfig::new(&self.formulas_dir)
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(dflt)
}
