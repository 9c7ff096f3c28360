//! Cheap query intent checks, all case-insensitive substring tests.

use std::sync::LazyLock;

use regex::Regex;

const CALCULATION_KEYWORDS: &[&str] = &[
    "calculate",
    "convert",
    "formula",
    "equation",
    "math",
    "solve",
    "computation",
    "calculator",
    "unit",
    "measure",
    "value",
    "equals",
    "how many",
    "how much",
    "equal to",
];

const FILE_CONVERSION_KEYWORDS: &[&str] = &[
    "convert file",
    "file conversion",
    "convert image",
    "convert video",
    "convert audio",
    "convert document",
    "transform file",
    "file format",
    "change format",
    "mp4",
    "mp3",
    "jpg",
    "png",
    "pdf",
    "docx",
    "xlsx",
    "convert to",
    "format to",
    "file to",
];

static BARE_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").ok());

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    let lower = query.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

pub fn has_digit(query: &str) -> bool {
    query.bytes().any(|b| b.is_ascii_digit())
}

/// A plain non-negative decimal such as `5` or `12.5`, after trimming.
pub fn is_bare_number(query: &str) -> bool {
    BARE_NUMBER
        .as_ref()
        .is_some_and(|re| re.is_match(query.trim()))
}

/// Calculation keywords, any digit, or a bare number.
pub fn is_calculation_query(query: &str) -> bool {
    contains_any(query, CALCULATION_KEYWORDS) || has_digit(query) || is_bare_number(query)
}

/// Whether a message without an attached file asks about file conversion.
pub fn is_file_conversion_query(query: &str) -> bool {
    contains_any(query, FILE_CONVERSION_KEYWORDS)
}
