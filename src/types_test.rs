// Unit tests for types module

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn extracted(total: f64, numbers: &[f64], tables: usize, unique: usize) -> SeedOutcome {
    SeedOutcome::Extracted(ExtractionResult {
        total,
        numbers_found: numbers.to_vec(),
        table_count: tables,
        unique_numbers: unique,
    })
}

#[test]
fn test_viewport_size_parse() {
    let size = ViewportSize::parse("1920x1080").unwrap();
    assert_eq!(size.width, 1920);
    assert_eq!(size.height, 1080);

    assert!(ViewportSize::parse("1920").is_err());
    assert!(ViewportSize::parse("1920x").is_err());
    assert!(ViewportSize::parse("x1080").is_err());
    assert!(ViewportSize::parse("1920X1080").is_err()); // uppercase X
}

#[test]
fn test_results_serialize_as_map_keyed_by_seed() {
    let report = RunReport {
        results: vec![
            SeedRecord {
                seed: 89,
                outcome: extracted(300.0, &[100.0, 100.0, 100.0], 1, 1),
            },
            SeedRecord {
                seed: 90,
                outcome: SeedOutcome::failed("Navigation timeout of 30000 ms exceeded"),
            },
        ],
        grand_total: 300.0,
        seeds_total: 2,
        skipped: vec![],
    };

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        json!({
            "results": {
                "89": {
                    "total": 300.0,
                    "numbersFound": [100.0, 100.0, 100.0],
                    "tableCount": 1,
                    "uniqueNumbers": 1
                },
                "90": {
                    "total": 0.0,
                    "error": "Navigation timeout of 30000 ms exceeded"
                }
            },
            "grandTotal": 300.0,
            "seedsTotal": 2,
            "skipped": []
        })
    );
}

#[test]
fn test_outcome_round_trips_untagged() {
    let failed: SeedOutcome =
        serde_json::from_value(json!({"total": 0.0, "error": "boom"})).unwrap();
    assert_eq!(failed.error(), Some("boom"));
    assert_eq!(failed.total(), 0.0);

    let ok: SeedOutcome = serde_json::from_value(json!({
        "total": 3.0,
        "numbersFound": [1.0, 1.0, 1.0],
        "tableCount": 1,
        "uniqueNumbers": 1
    }))
    .unwrap();
    assert_eq!(ok, extracted(3.0, &[1.0, 1.0, 1.0], 1, 1));
}

#[test]
fn test_report_lookups() {
    let report = RunReport {
        results: vec![
            SeedRecord {
                seed: 1,
                outcome: extracted(5.0, &[5.0], 1, 1),
            },
            SeedRecord {
                seed: 2,
                outcome: SeedOutcome::failed("nope"),
            },
        ],
        grand_total: 5.0,
        seeds_total: 3,
        skipped: vec![3],
    };

    assert_eq!(report.seeds_processed(), 2);
    assert_eq!(report.failures(), 1);
    assert_eq!(report.outcome(1).map(SeedOutcome::total), Some(5.0));
    assert!(report.outcome(3).is_none());
}

#[test]
fn test_sample_truncates() {
    let result = ExtractionResult {
        total: 21.0,
        numbers_found: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        table_count: 1,
        unique_numbers: 6,
    };
    assert_eq!(result.sample(5), &[1.0, 2.0, 3.0, 4.0, 5.0]);

    let short = ExtractionResult {
        total: 1.0,
        numbers_found: vec![1.0],
        table_count: 1,
        unique_numbers: 1,
    };
    assert_eq!(short.sample(5), &[1.0]);
}
