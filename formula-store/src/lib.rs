//! Keyword retrieval over the unit-conversion formula corpus.
//!
//! This crate provides a small API to:
//! - Load the eight category documents from disk, always reflecting the
//!   latest on-disk content
//! - Pick the best document for a query and slice out the sections that
//!   mention the query's units
//! - Look a document up directly from a caller's conversion context
//!
//! Retrieval is plain case-insensitive substring matching; there are no
//! embeddings and no index.

mod category;
mod classify;
mod config;
mod corpus;
mod errors;
mod sections;
mod units;

pub use category::{Category, UnitPattern};
pub use classify::{extract_units, select_document};
pub use config::{CorpusConfig, DEFAULT_FORMULAS_DIR};
pub use corpus::{CorpusLoader, FormulaDocument};
pub use errors::FormulaError;
pub use sections::extract_sections;
pub use units::{
    CatalogGroup, ConversionContext, SelectedUnit, SelectionOutcome, UnitSelection, unit_catalog,
};

use tracing::{debug, trace, warn};

/// Output of a keyword retrieval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Retrieval {
    /// Category of the selected document, if any matched.
    pub category: Option<Category>,
    /// Canonical unit names found in the query.
    pub units: Vec<&'static str>,
    /// Context text for the prompt; empty if nothing matched.
    pub text: String,
}

/// High-level facade over the loader, classifier and extractor.
///
/// This is the single entry point recommended for application code.
pub struct FormulaCorpus {
    loader: CorpusLoader,
}

impl FormulaCorpus {
    /// Constructs a corpus from the given configuration.
    ///
    /// # Errors
    /// Returns `FormulaError::Config` if the configuration is invalid.
    pub fn new(cfg: CorpusConfig) -> Result<Self, FormulaError> {
        cfg.validate()?;
        trace!("FormulaCorpus::new dir={:?}", cfg.dir);
        Ok(Self {
            loader: CorpusLoader::new(cfg),
        })
    }

    /// Direct access to the underlying loader.
    pub fn loader(&self) -> &CorpusLoader {
        &self.loader
    }

    /// Retrieves formula context for a free-text query.
    ///
    /// Selects at most one document, extracts the units it names (scoped to
    /// that document's category), then cuts the document down to the
    /// relevant sections.
    pub fn retrieve(&self, query: &str) -> Retrieval {
        let docs = self.loader.documents();
        let Some(doc) = select_document(query, &docs) else {
            debug!("no formula document matched query");
            return Retrieval::default();
        };

        let units = extract_units(query, doc.category);
        let text = extract_sections(&doc.content, &units);
        debug!(category = %doc.category, ?units, chars = text.len(), "formula context retrieved");

        Retrieval {
            category: Some(doc.category),
            units,
            text,
        }
    }

    /// Loads the full document for a caller-supplied category label.
    ///
    /// Returns `None` (after logging) when the label matches no category or
    /// the document is missing or unreadable.
    pub fn for_context(&self, category_label: &str) -> Option<FormulaDocument> {
        let Some(category) = Category::resolve(category_label) else {
            warn!(category = category_label, "no formula file matches conversion category");
            return None;
        };

        match self.loader.document(category) {
            Ok(Some(doc)) => Some(doc),
            Ok(None) => {
                warn!(%category, dir = ?self.loader.dir(), "formula file does not exist");
                None
            }
            Err(err) => {
                warn!(%category, error = %err, "error reading formula file");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const LENGTH: &str = "Length Conversions\nunits of distance\n\n\n\n\
General Formula\nresult = value * factor\n\n\n\n\n\
1 kilometer = 1000 meter\n1 mile = 1.609344 kilometer\n1 inch = 2.54 centimeter\n\
Example\n5 kilometer = 3.106856 mile\n";

    fn corpus() -> (tempfile::TempDir, FormulaCorpus) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("length.txt"), LENGTH).unwrap();
        fs::write(dir.path().join("mass.txt"), "Mass\n1 kilogram = 1000 gram\n").unwrap();
        let corpus = FormulaCorpus::new(CorpusConfig::new(dir.path())).unwrap();
        (dir, corpus)
    }

    #[test]
    fn retrieve_km_to_miles() {
        let (_dir, corpus) = corpus();
        let r = corpus.retrieve("convert 5 km to miles");

        assert_eq!(r.category, Some(Category::Length));
        assert_eq!(r.units, vec!["kilometer", "mile"]);
        assert!(r.text.contains("General Formula"));
        assert!(r.text.contains("1 mile = 1.609344 kilometer"));
        assert!(r.text.contains("Example"));
        assert!(!r.text.contains("1 inch"));
    }

    #[test]
    fn retrieve_without_units_returns_whole_document() {
        let (_dir, corpus) = corpus();
        let r = corpus.retrieve("how far is that distance");
        assert_eq!(r.category, Some(Category::Length));
        assert!(r.units.is_empty());
        assert_eq!(r.text, LENGTH);
    }

    #[test]
    fn retrieve_with_no_match_is_empty() {
        let (_dir, corpus) = corpus();
        assert_eq!(corpus.retrieve("what is your name"), Retrieval::default());
    }

    #[test]
    fn unreadable_directory_degrades_to_empty() {
        let corpus = FormulaCorpus::new(CorpusConfig::new("/no/such/formulas")).unwrap();
        assert_eq!(corpus.retrieve("convert 5 km to miles"), Retrieval::default());
    }

    #[test]
    fn context_lookup_loads_document_verbatim() {
        let (_dir, corpus) = corpus();
        for label in ["Length", "length", "LENGTH", "distance"] {
            let doc = corpus.for_context(label).unwrap();
            assert_eq!(&*doc.content, LENGTH);
        }
        assert_eq!(
            &*corpus.for_context("Mass/Weight").unwrap().content,
            "Mass\n1 kilogram = 1000 gram\n"
        );
    }

    #[test]
    fn context_lookup_misses() {
        let (_dir, corpus) = corpus();
        assert!(corpus.for_context("Volume").is_none());
        assert!(corpus.for_context("currency").is_none());
    }
}
