use anyhow::Result;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for programmatic consumption
    Json,
    /// Human-readable console narration
    #[default]
    Simple,
}

/// Cell texts of one visible table-like element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub cells: Vec<String>,
}

impl TableSnapshot {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableSnapshot {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// Numbers pulled out of one report page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Sum of every match of every pattern
    pub total: f64,
    /// Parsed values in match order, duplicates retained
    pub numbers_found: Vec<f64>,
    /// Visible table-like elements that were read
    pub table_count: usize,
    /// Distinct values in `numbers_found`
    pub unique_numbers: usize,
}

impl ExtractionResult {
    /// First `n` numbers, for progress output
    pub fn sample(&self, n: usize) -> &[f64] {
        &self.numbers_found[..self.numbers_found.len().min(n)]
    }
}

/// What happened to a seed that was attempted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedOutcome {
    Extracted(ExtractionResult),
    Failed { total: f64, error: String },
}

impl SeedOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        SeedOutcome::Failed {
            total: 0.0,
            error: error.into(),
        }
    }

    /// Contribution of this seed to the grand total
    pub fn total(&self) -> f64 {
        match self {
            SeedOutcome::Extracted(result) => result.total,
            SeedOutcome::Failed { total, .. } => *total,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SeedOutcome::Extracted(_) => None,
            SeedOutcome::Failed { error, .. } => Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedRecord {
    pub seed: u32,
    pub outcome: SeedOutcome,
}

/// Everything a run produced, in seed-list order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    #[serde(serialize_with = "serialize_results")]
    pub results: Vec<SeedRecord>,
    pub grand_total: f64,
    /// Length of the configured seed list
    pub seeds_total: usize,
    /// Seeds where no table selector matched; absent from `results`
    pub skipped: Vec<u32>,
}

impl RunReport {
    pub fn seeds_processed(&self) -> usize {
        self.results.len()
    }

    pub fn outcome(&self, seed: u32) -> Option<&SeedOutcome> {
        self.results
            .iter()
            .find(|r| r.seed == seed)
            .map(|r| &r.outcome)
    }

    pub fn failures(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.error().is_some())
            .count()
    }
}

fn serialize_results<S>(results: &[SeedRecord], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(results.iter().map(|r| (r.seed, &r.outcome)))
}

/// Browser viewport dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl ViewportSize {
    /// Parse viewport size from "WIDTHxHEIGHT" format (e.g., "1920x1080")
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('x').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid viewport format. Use WIDTHxHEIGHT (e.g., 1920x1080)");
        }

        let width = parts[0]
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid width in viewport size"))?;
        let height = parts[1]
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid height in viewport size"))?;

        Ok(ViewportSize { width, height })
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
