// Unit tests for console output

use super::*;
use crate::types::{ExtractionResult, SeedRecord};
use pretty_assertions::assert_eq;

fn sample_report() -> RunReport {
    RunReport {
        results: vec![
            SeedRecord {
                seed: 89,
                outcome: SeedOutcome::Extracted(ExtractionResult {
                    total: 300.0,
                    numbers_found: vec![100.0, 100.0, 100.0],
                    table_count: 1,
                    unique_numbers: 1,
                }),
            },
            SeedRecord {
                seed: 90,
                outcome: SeedOutcome::failed("Navigation timeout of 30000 ms exceeded"),
            },
        ],
        grand_total: 300.0,
        seeds_total: 3,
        skipped: vec![91],
    }
}

fn render(format: OutputFormat, f: impl FnOnce(&mut Reporter<Vec<u8>>)) -> String {
    let mut reporter = Reporter::new(Vec::new(), format);
    f(&mut reporter);
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn test_format_total() {
    assert_eq!(format_total(300.0), "300.00");
    assert_eq!(format_total(3703.6800000000003), "3703.68");
    assert_eq!(format_total(-126.0), "-126.00");
}

#[test]
fn test_format_sample() {
    assert_eq!(format_sample(&[100.0, 1234.56], 2), "[100.00, 1234.56]");
    assert_eq!(format_sample(&[-0.5, 1.0 / 3.0], 2), "[-0.50, 0.33]");
    assert_eq!(
        format_sample(&[1.0, 2.0, 3.0, 4.0, 5.0], 9),
        "[1.00, 2.00, 3.00, 4.00, 5.00, ...]"
    );
    assert_eq!(format_sample(&[], 0), "[]");
}

#[test]
fn test_simple_summary_lists_totals_and_errors() {
    let output = render(OutputFormat::Simple, |r| {
        r.finish(&sample_report()).unwrap()
    });

    assert!(output.contains("Seeds processed: 2/3\n"));
    assert!(output.contains("Seeds without tables: 91"));
    assert!(output.contains("Grand total: 300.00"));
    assert!(output.contains("  Seed 89: 300.00"));
    assert!(output.contains("  Seed 90: ERROR - Navigation timeout of 30000 ms exceeded"));
    assert_eq!(output.lines().last(), Some("✅ FINAL TOTAL: 300.00"));
}

#[test]
fn test_simple_progress_lines() {
    let result = ExtractionResult {
        total: 21.0,
        numbers_found: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        table_count: 2,
        unique_numbers: 6,
    };

    let output = render(OutputFormat::Simple, |r| {
        r.event(SeedEvent::Started {
            seed: 5,
            url: "http://reports.test/report?seed=5",
        })
        .unwrap();
        r.event(SeedEvent::Extracted {
            seed: 5,
            result: &result,
        })
        .unwrap();
    });

    assert_eq!(
        output,
        "📄 Seed 5: http://reports.test/report?seed=5\n\
         \x20  Tables found: 2\n\
         \x20  Numbers extracted: 6\n\
         \x20  Unique numbers: 6\n\
         \x20  Seed total: 21.00\n\
         \x20  Sample: [1.00, 2.00, 3.00, 4.00, 5.00, ...]\n"
    );
}

#[test]
fn test_start_banner() {
    let config = RunConfig {
        seeds: vec![89, 90],
        ..RunConfig::default()
    };
    let output = render(OutputFormat::Simple, |r| r.start(&config).unwrap());

    assert!(output.starts_with("🚀 tablesum report aggregation\n"));
    assert!(output.contains("Seeds: 89, 90"));
}

#[test]
fn test_json_output_is_only_the_report() {
    let report = sample_report();
    let output = render(OutputFormat::Json, |r| {
        r.start(&RunConfig::default()).unwrap();
        r.event(SeedEvent::NoTables { seed: 91 }).unwrap();
        r.finish(&report).unwrap();
    });

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["grandTotal"], 300.0);
    assert_eq!(value["results"]["89"]["uniqueNumbers"], 1);
    assert_eq!(
        value["results"]["90"]["error"],
        "Navigation timeout of 30000 ms exceeded"
    );
    assert_eq!(value["skipped"], serde_json::json!([91]));
    assert_eq!(value["seedsTotal"], 3);
}
