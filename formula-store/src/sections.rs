//! Section extractor: cuts a formula document down to the parts a query needs.

use std::collections::HashSet;

use regex::RegexBuilder;
use tracing::trace;

const TITLE_LINES: usize = 5;
const GENERAL_FORMULA_MARKER: &str = "General Formula";
const GENERAL_FORMULA_LINES: usize = 6;
const EXAMPLE_MARKER: &str = "Example";
const EXAMPLE_LINES: usize = 5;

/// Builds the retrieved context for `content` given the matched unit names.
///
/// With no units the whole document is returned unchanged. Otherwise the
/// result is, in order: the title block, the "General Formula" window, every
/// line naming one of the units, and the "Example" window. Repeated blocks
/// are dropped, keeping the first occurrence.
///
/// Unit names are matched as case-insensitive literals.
pub fn extract_sections(content: &str, units: &[&str]) -> String {
    if units.is_empty() {
        return content.to_string();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let mut blocks: Vec<String> = Vec::new();

    blocks.push(window(&lines, 0, TITLE_LINES));

    if let Some(i) = lines.iter().position(|l| l.contains(GENERAL_FORMULA_MARKER)) {
        blocks.push(window(&lines, i, GENERAL_FORMULA_LINES));
    }

    for unit in units {
        let Ok(re) = RegexBuilder::new(&regex::escape(unit))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };
        let before = blocks.len();
        blocks.extend(lines.iter().filter(|l| re.is_match(l)).map(|l| l.to_string()));
        trace!(unit, hits = blocks.len() - before, "unit lines collected");
    }

    if let Some(i) = lines.iter().position(|l| l.contains(EXAMPLE_MARKER)) {
        blocks.push(window(&lines, i, EXAMPLE_LINES));
    }

    let mut seen = HashSet::new();
    blocks.retain(|b| seen.insert(b.clone()));
    blocks.join("\n")
}

fn window(lines: &[&str], start: usize, len: usize) -> String {
    let end = (start + len).min(lines.len());
    lines[start.min(end)..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Length Conversion Formulas\n\
=========================\n\
Base unit: meter\n\
Source: internal table\n\
\n\
General Formula\n\
value_in_target = value * factor\n\
factor = source_to_meter / target_to_meter\n\
\n\
\n\
\n\
1 kilometer = 1000 meters\n\
1 mile = 1609.344 meters\n\
1 inch = 0.0254 meters\n\
\n\
Example\n\
5 kilometer = 5000 meter\n\
5 kilometer = 3.1069 mile\n\
done\n\
\n\
trailer line";

    #[test]
    fn no_units_returns_whole_document() {
        assert_eq!(extract_sections(DOC, &[]), DOC);
    }

    #[test]
    fn picks_title_formula_unit_lines_and_example() {
        let out = extract_sections(DOC, &["kilometer", "mile"]);

        assert!(out.starts_with("Length Conversion Formulas\n"));
        assert!(out.contains("General Formula\nvalue_in_target = value * factor"));
        assert!(out.contains("1 kilometer = 1000 meters"));
        assert!(out.contains("1 mile = 1609.344 meters"));
        assert!(out.contains("Example\n5 kilometer = 5000 meter"));
        assert!(!out.contains("1 inch"));
        assert!(!out.contains("trailer line"));
    }

    #[test]
    fn duplicate_unit_hits_collapse_but_example_window_repeats() {
        // Matches both units (kept once) and also sits inside the example window.
        let out = extract_sections(DOC, &["kilometer", "mile"]);
        let hits = out
            .split('\n')
            .filter(|l| *l == "5 kilometer = 3.1069 mile")
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn unit_match_is_case_insensitive() {
        let out = extract_sections("a\nb\nc\nd\ne\nINCH table: 1 INCH = 2.54 cm", &["inch"]);
        assert!(out.contains("INCH table"));
    }

    #[test]
    fn metacharacters_are_literal() {
        let doc = "a\nb\nc\nd\ne\n1 km/h = 0.27778 m/s\n1 mph = 0.44704 m.s";
        let out = extract_sections(doc, &["m.s"]);
        assert!(out.contains("1 mph = 0.44704 m.s"));
        assert!(!out.contains("0.27778"));
    }

    #[test]
    fn missing_markers_degrade_gracefully() {
        let doc = "a\nb\nc\nd\ne\nf\n1 celsius = 33.8 fahrenheit";
        let out = extract_sections(doc, &["celsius"]);
        assert_eq!(out, "a\nb\nc\nd\ne\n1 celsius = 33.8 fahrenheit");
    }
}
