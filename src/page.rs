use std::time::Duration;

use crate::errors::SeedError;
use crate::types::TableSnapshot;

/// A single browser page the harvester drives, reused for every seed.
///
/// `webdriver::Browser` is the real implementation; tests substitute an
/// in-memory page.
#[allow(async_fn_in_trait)]
pub trait ReportPage {
    /// Load `url` and wait for network quiescence, giving up after `timeout`
    async fn navigate(
        &self,
        url: &str,
        timeout: Duration,
        idle_window: Duration,
    ) -> Result<(), SeedError>;

    /// Wait until at least one element matches `selector`
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), SeedError>;

    /// Cell texts of every visible element matching `table_selector`
    async fn collect_tables(
        &self,
        table_selector: &str,
        cell_selector: &str,
    ) -> Result<Vec<TableSnapshot>, SeedError>;
}
