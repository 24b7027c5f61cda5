//! Console presentation of a run.
//!
//! `Simple` narrates progress as seeds complete and ends with a breakdown;
//! `Json` stays silent until the end and prints the whole `RunReport`.

use anyhow::Result;
use std::io::Write;

use crate::config::RunConfig;
use crate::harvester::SeedEvent;
use crate::types::{OutputFormat, RunReport, SeedOutcome};

/// Fixed identity line printed in the start banner
pub const RUN_IDENTITY: &str = "tablesum report aggregation";

/// How many numbers to show per seed in progress output
const SAMPLE_SIZE: usize = 5;

const RULE: &str = "============================================================";

pub struct Reporter<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Reporter { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn start(&mut self, config: &RunConfig) -> Result<()> {
        if self.format != OutputFormat::Simple {
            return Ok(());
        }
        let seeds: Vec<String> = config.seeds.iter().map(u32::to_string).collect();

        writeln!(self.out, "🚀 {}", RUN_IDENTITY)?;
        writeln!(
            self.out,
            "   Task: sum every number in the report tables for each seed"
        )?;
        writeln!(self.out, "   Seeds: {}", seeds.join(", "))?;
        writeln!(self.out)?;
        Ok(())
    }

    pub fn event(&mut self, event: SeedEvent<'_>) -> Result<()> {
        if self.format != OutputFormat::Simple {
            return Ok(());
        }

        match event {
            SeedEvent::Started { seed, url } => {
                writeln!(self.out, "📄 Seed {}: {}", seed, url)?;
            }
            SeedEvent::Extracted { result, .. } => {
                writeln!(self.out, "   Tables found: {}", result.table_count)?;
                writeln!(
                    self.out,
                    "   Numbers extracted: {}",
                    result.numbers_found.len()
                )?;
                writeln!(self.out, "   Unique numbers: {}", result.unique_numbers)?;
                writeln!(self.out, "   Seed total: {}", format_total(result.total))?;
                writeln!(
                    self.out,
                    "   Sample: {}",
                    format_sample(result.sample(SAMPLE_SIZE), result.numbers_found.len())
                )?;
            }
            SeedEvent::Failed { error, .. } => {
                writeln!(self.out, "   ❌ Error: {}", error)?;
            }
            SeedEvent::NoTables { .. } => {
                writeln!(self.out, "   ⚠️  No tables found, skipping")?;
            }
        }
        Ok(())
    }

    pub fn finish(&mut self, report: &RunReport) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(report)?)?;
            }
            OutputFormat::Simple => {
                writeln!(self.out)?;
                writeln!(self.out, "{}", RULE)?;
                writeln!(self.out, "FINAL RESULTS")?;
                writeln!(self.out, "{}", RULE)?;
                writeln!(
                    self.out,
                    "Seeds processed: {}/{}",
                    report.seeds_processed(),
                    report.seeds_total
                )?;
                if !report.skipped.is_empty() {
                    let skipped: Vec<String> =
                        report.skipped.iter().map(u32::to_string).collect();
                    writeln!(self.out, "Seeds without tables: {}", skipped.join(", "))?;
                }
                writeln!(self.out, "Grand total: {}", format_total(report.grand_total))?;
                writeln!(self.out)?;
                writeln!(self.out, "Breakdown:")?;
                for record in &report.results {
                    match &record.outcome {
                        SeedOutcome::Extracted(result) => writeln!(
                            self.out,
                            "  Seed {}: {}",
                            record.seed,
                            format_total(result.total)
                        )?,
                        SeedOutcome::Failed { error, .. } => {
                            writeln!(self.out, "  Seed {}: ERROR - {}", record.seed, error)?
                        }
                    }
                }
                writeln!(self.out, "{}", RULE)?;
                writeln!(self.out, "✅ FINAL TOTAL: {}", format_total(report.grand_total))?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Totals always print with two decimals
pub fn format_total(value: f64) -> String {
    format!("{:.2}", value)
}

fn format_sample(sample: &[f64], found: usize) -> String {
    let values: Vec<String> = sample.iter().map(|v| format!("{:.2}", v)).collect();
    if found > sample.len() {
        format!("[{}, ...]", values.join(", "))
    } else {
        format!("[{}]", values.join(", "))
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;
