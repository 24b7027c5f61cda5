//! # tablesum
#![allow(clippy::uninlined_format_args)]
//!
//! Drives a browser through a list of report pages, one per seed, pulls every
//! number out of the rendered tables and adds them up.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Visit the default seeds against the configured report URL
//! tablesum run --url-template "http://localhost:8080/report?seed={seed}"
//!
//! # Pick seeds and a browser
//! tablesum run --seeds 89,90 --browser firefox
//!
//! # Load settings from a JSON file, emit the result as JSON
//! tablesum run --config run.json --format json | jq '.grandTotal'
//!
//! # Check what a cell contributes without a browser
//! tablesum parse '$1,234.56' '-42'
//! ```
//!
//! ## How numbers are counted
//!
//! Each cell is scanned by three overlapping patterns and every match of
//! every pattern is added, so a cell reading `100` contributes 300. Totals
//! are only comparable with runs that count the same way.
//!
//! ## Library Usage
//!
//! ```no_run
//! use tablesum::{Browser, Harvester, RunConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RunConfig {
//!     seeds: vec![89, 90],
//!     ..RunConfig::default()
//! };
//! let browser = Browser::launch(&config).await?;
//! let report = Harvester::new(&browser, &config).run(|_| {}).await;
//! println!("{:.2}", report.grand_total);
//! browser.close().await?;
//! # Ok(())
//! # }
//! ```

/// CLI command handlers
pub mod commands;

/// Run configuration
pub mod config;

/// Per-seed error type
pub mod errors;

/// The seed loop and selector fallback chain
pub mod harvester;

/// Number patterns and per-page totals
pub mod numbers;

/// Page abstraction the harvester drives
pub mod page;

/// Console and JSON output
pub mod report;

/// Result and snapshot types
pub mod types;

/// WebDriver browser control
pub mod webdriver;

/// Automatic WebDriver process management
pub mod webdriver_manager;

pub use config::RunConfig;
pub use errors::SeedError;
pub use harvester::{Harvester, SeedEvent};
pub use page::ReportPage;
pub use types::{ExtractionResult, OutputFormat, RunReport, SeedOutcome, TableSnapshot};
pub use webdriver::{Browser, BrowserType};
