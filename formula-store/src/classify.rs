//! Keyword classifier: picks one document per query and the units it names.

use crate::{category::Category, corpus::FormulaDocument};

/// Number of category keywords contained in `lower_query`.
fn score(category: Category, lower_query: &str) -> usize {
    category
        .keywords()
        .iter()
        .filter(|k| lower_query.contains(*k))
        .count()
}

/// Selects the document whose keyword list has the most substring hits.
///
/// Only a strictly higher score replaces the current best, so ties go to
/// the document that comes first in `docs`. Returns `None` when every
/// document scores zero.
pub fn select_document<'a>(query: &str, docs: &'a [FormulaDocument]) -> Option<&'a FormulaDocument> {
    let lower = query.to_lowercase();
    let mut best: Option<&FormulaDocument> = None;
    let mut best_score = 0usize;

    for doc in docs {
        let s = score(doc.category, &lower);
        if s > best_score {
            best_score = s;
            best = Some(doc);
        }
    }
    best
}

/// Canonical unit names of `category` mentioned in `query`, in list order.
///
/// Matching never crosses into other categories.
pub fn extract_units(query: &str, category: Category) -> Vec<&'static str> {
    let lower = query.to_lowercase();
    category
        .unit_patterns()
        .iter()
        .filter(|u| u.is_mentioned_in(&lower))
        .map(|u| u.name)
        .collect()
}
