use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::harvester::Harvester;
use crate::report::Reporter;
use crate::types::{OutputFormat, ViewportSize};
use crate::webdriver::{Browser, BrowserType};

/// CLI values layered over the config file
#[derive(Debug, Default)]
pub struct RunOverrides {
    pub config: Option<PathBuf>,
    pub seeds: Option<Vec<u32>>,
    pub url_template: Option<String>,
    pub browser: Option<BrowserType>,
    pub no_headless: bool,
    pub viewport: Option<String>,
    pub user_agent: Option<String>,
    pub delay_ms: Option<u64>,
    pub nav_timeout_ms: Option<u64>,
}

impl RunOverrides {
    /// Defaults, then the config file, then flags
    pub fn resolve(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(seeds) = self.seeds {
            config.seeds = seeds;
        }
        if let Some(template) = self.url_template {
            config.url_template = template;
        }
        if let Some(browser) = self.browser {
            config.browser = browser;
        }
        if self.no_headless {
            config.headless = false;
        }
        if let Some(viewport) = &self.viewport {
            config.viewport = Some(ViewportSize::parse(viewport)?);
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = Some(user_agent);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(timeout) = self.nav_timeout_ms {
            config.navigation_timeout_ms = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

pub async fn handle_run(overrides: RunOverrides, format: OutputFormat) -> Result<()> {
    let config = overrides.resolve()?;
    info!(
        "Starting run over {} seeds with {:?}",
        config.seeds.len(),
        config.browser
    );

    let mut reporter = Reporter::new(std::io::stdout(), format);
    reporter.start(&config)?;

    let browser = Browser::launch(&config)
        .await
        .context("Failed to start browser")?;
    info!("Browser ready ({:?})", browser.browser_type());

    let report = Harvester::new(&browser, &config)
        .run(|event| {
            if let Err(e) = reporter.event(event) {
                warn!("Failed to write progress: {}", e);
            }
        })
        .await;

    if let Err(e) = browser.close().await {
        warn!("Failed to close browser cleanly: {}", e);
    }

    info!(
        "Run complete: {} seeds, {} failed, grand total {:.2}",
        report.seeds_processed(),
        report.failures(),
        report.grand_total
    );
    reporter.finish(&report)
}
