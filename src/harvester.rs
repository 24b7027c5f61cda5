use tracing::{debug, error, info, warn};

use crate::config::RunConfig;
use crate::errors::SeedError;
use crate::numbers;
use crate::page::ReportPage;
use crate::types::{ExtractionResult, RunReport, SeedOutcome, SeedRecord};

/// Progress notifications emitted while a run is in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedEvent<'a> {
    Started { seed: u32, url: &'a str },
    Extracted { seed: u32, result: &'a ExtractionResult },
    Failed { seed: u32, error: &'a str },
    NoTables { seed: u32 },
}

/// Drives one page through every configured seed, strictly in order.
pub struct Harvester<'a, P> {
    page: &'a P,
    config: &'a RunConfig,
}

impl<'a, P: ReportPage> Harvester<'a, P> {
    pub fn new(page: &'a P, config: &'a RunConfig) -> Self {
        Harvester { page, config }
    }

    /// Visit every seed and aggregate the results.
    ///
    /// Per-seed failures are recorded and never stop the loop.
    pub async fn run<F>(&self, mut on_event: F) -> RunReport
    where
        F: FnMut(SeedEvent<'_>),
    {
        let mut report = RunReport {
            seeds_total: self.config.seeds.len(),
            ..RunReport::default()
        };

        for &seed in &self.config.seeds {
            let url = self.config.report_url(seed);
            on_event(SeedEvent::Started { seed, url: &url });

            let outcome = match self.harvest_seed(&url).await {
                Ok(Some(result)) => {
                    info!(
                        "Seed {}: {} tables, {} numbers, total {:.2}",
                        seed,
                        result.table_count,
                        result.numbers_found.len(),
                        result.total
                    );
                    on_event(SeedEvent::Extracted {
                        seed,
                        result: &result,
                    });
                    SeedOutcome::Extracted(result)
                }
                Ok(None) => {
                    warn!("Seed {}: no table content found, skipping", seed);
                    on_event(SeedEvent::NoTables { seed });
                    report.skipped.push(seed);
                    continue;
                }
                Err(e) => {
                    error!("Seed {}: {}", seed, e);
                    let message = e.to_string();
                    on_event(SeedEvent::Failed {
                        seed,
                        error: &message,
                    });
                    report.results.push(SeedRecord {
                        seed,
                        outcome: SeedOutcome::failed(message),
                    });
                    continue;
                }
            };

            report.grand_total += outcome.total();
            report.results.push(SeedRecord { seed, outcome });

            let delay = self.config.delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        report
    }

    /// `Ok(None)` when the page loaded but no selector ever matched
    async fn harvest_seed(&self, url: &str) -> Result<Option<ExtractionResult>, SeedError> {
        self.page
            .navigate(
                url,
                self.config.navigation_timeout(),
                self.config.idle_window(),
            )
            .await?;

        let Some(selector) = self.detect_tables().await else {
            return Ok(None);
        };
        debug!("Table content detected via '{}'", selector);

        let tables = self
            .page
            .collect_tables(&self.config.table_selector, &self.config.cell_selector)
            .await?;

        Ok(Some(numbers::summarize(&tables)))
    }

    /// Walk the selector chain and return the first selector that appeared
    pub async fn detect_tables(&self) -> Option<&'a str> {
        let config: &'a RunConfig = self.config;
        for (selector, timeout) in config.selector_chain() {
            match self.page.wait_for_selector(selector, timeout).await {
                Ok(()) => return Some(selector),
                Err(e) => debug!("{}", e),
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "harvester_test.rs"]
mod harvester_test;
