use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::types::ViewportSize;
use crate::webdriver::BrowserType;

/// Placeholder in `url_template` replaced by the seed
pub const SEED_PLACEHOLDER: &str = "{seed}";

pub const DEFAULT_URL_TEMPLATE: &str = "https://reports.example.invalid/report?seed={seed}";

pub const DEFAULT_USER_AGENT: &str = "DataDash-QA-Bot/1.0";

/// Everything a run needs to know, loaded from JSON and/or CLI flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Seeds in visiting order
    pub seeds: Vec<u32>,
    /// Report URL with a `{seed}` placeholder
    pub url_template: String,
    pub navigation_timeout_ms: u64,
    /// How long the resource count must stay flat to count as idle
    pub idle_window_ms: u64,
    pub primary_selector: String,
    pub primary_timeout_ms: u64,
    /// Tried in order after the primary selector, first hit wins
    pub fallback_selectors: Vec<String>,
    pub fallback_timeout_ms: u64,
    /// Selector for table-like elements read by the extractor
    pub table_selector: String,
    /// Selector for cell-like descendants of a table-like element
    pub cell_selector: String,
    /// Pause after each extracted seed
    pub delay_ms: u64,
    pub browser: BrowserType,
    pub headless: bool,
    pub viewport: Option<ViewportSize>,
    /// Sent instead of the browser's own user agent when set
    pub user_agent: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            seeds: (89..=98).collect(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            navigation_timeout_ms: 30_000,
            idle_window_ms: 500,
            primary_selector: "table".to_string(),
            primary_timeout_ms: 15_000,
            fallback_selectors: vec![
                r#"[class*="table"]"#.to_string(),
                r#"[role="table"]"#.to_string(),
                r#"[role="grid"]"#.to_string(),
                r#"[class*="grid"]"#.to_string(),
            ],
            fallback_timeout_ms: 5_000,
            table_selector: concat!(
                r#"table, [class*="table"], [role="table"], [role="grid"], "#,
                r#"[role="treegrid"], [class*="grid"]"#
            )
            .to_string(),
            cell_selector: concat!(
                r#"td, th, .cell, [role="cell"], [role="gridcell"], "#,
                r#"[role="columnheader"], [role="rowheader"]"#
            )
            .to_string(),
            delay_ms: 1_000,
            browser: BrowserType::Chrome,
            headless: true,
            viewport: Some(ViewportSize {
                width: 1920,
                height: 1080,
            }),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl RunConfig {
    /// Load a config file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RunConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.seeds.is_empty() {
            anyhow::bail!("No seeds configured");
        }
        // Results are keyed by seed
        let mut seen = HashSet::new();
        if let Some(dup) = self.seeds.iter().find(|seed| !seen.insert(**seed)) {
            anyhow::bail!("Seed {} is listed more than once", dup);
        }
        if !self.url_template.contains(SEED_PLACEHOLDER) {
            anyhow::bail!(
                "URL template '{}' has no {} placeholder",
                self.url_template,
                SEED_PLACEHOLDER
            );
        }
        // Any seed must produce a valid URL
        url::Url::parse(&self.report_url(0))
            .with_context(|| format!("Invalid URL template '{}'", self.url_template))?;
        if self.primary_selector.trim().is_empty() {
            anyhow::bail!("Primary selector must not be empty");
        }
        Ok(())
    }

    pub fn report_url(&self, seed: u32) -> String {
        self.url_template
            .replace(SEED_PLACEHOLDER, &seed.to_string())
    }

    /// Primary selector followed by the fallbacks, each with its wait budget
    pub fn selector_chain(&self) -> Vec<(&str, Duration)> {
        std::iter::once((
            self.primary_selector.as_str(),
            Duration::from_millis(self.primary_timeout_ms),
        ))
        .chain(
            self.fallback_selectors
                .iter()
                .map(|s| (s.as_str(), Duration::from_millis(self.fallback_timeout_ms))),
        )
        .collect()
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn idle_window(&self) -> Duration {
        Duration::from_millis(self.idle_window_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
