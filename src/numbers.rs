//! Number extraction from table cell text.
//!
//! Three overlapping patterns run over every cell independently. A numeric
//! substring matched by more than one pattern is counted once per pattern,
//! so a plain `"100"` contributes 300 to the page total.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{ExtractionResult, TableSnapshot};

/// Currency markers stripped before parsing
const CURRENCY_MARKERS: &[char] = &['$', '€', '£', '¥'];

static RE_CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[$€£¥]?[0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?").expect("invalid regex: currency")
});

static RE_GROUPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?").expect("invalid regex: grouped")
});

static RE_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9,]*\.?[0-9]+").expect("invalid regex: digit run"));

/// Patterns in application order
fn patterns() -> [&'static Regex; 3] {
    [&*RE_CURRENCY, &*RE_GROUPED, &*RE_DIGIT_RUN]
}

/// Strip currency markers, separators and whitespace, then parse.
///
/// Returns `None` for anything that does not parse to a finite value.
pub fn clean_and_parse(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_MARKERS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Every number found in `text`, pattern by pattern, in match order.
pub fn numbers_in_cell(text: &str) -> Vec<f64> {
    patterns()
        .into_iter()
        .flat_map(|re| re.find_iter(text))
        .filter_map(|m| clean_and_parse(m.as_str()))
        .collect()
}

/// Count of distinct values; `0.0` and `-0.0` are the same value.
pub fn count_unique(values: &[f64]) -> usize {
    values
        .iter()
        .map(|v| if *v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
        .collect::<HashSet<_>>()
        .len()
}

/// Build the per-page result from the tables a page returned.
pub fn summarize(tables: &[TableSnapshot]) -> ExtractionResult {
    let mut total = 0.0;
    let mut numbers_found = Vec::new();

    for table in tables {
        for cell in &table.cells {
            for value in numbers_in_cell(cell) {
                total += value;
                numbers_found.push(value);
            }
        }
    }

    let unique_numbers = count_unique(&numbers_found);

    ExtractionResult {
        total,
        numbers_found,
        table_count: tables.len(),
        unique_numbers,
    }
}

#[cfg(test)]
#[path = "numbers_test.rs"]
mod numbers_test;
