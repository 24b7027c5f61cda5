use anyhow::{Context, Result};
use fantoccini::error::CmdError;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::errors::SeedError;
use crate::page::ReportPage;
use crate::types::{TableSnapshot, ViewportSize};
use crate::webdriver_manager::GLOBAL_WEBDRIVER_MANAGER;

/// How often the network-idle wait polls the page
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Reports document readiness and how many resources the page has fetched
const IDLE_STATE_SCRIPT: &str = r#"
    return {
        ready_state: document.readyState,
        resources: performance.getEntriesByType('resource').length
    };
"#;

/// Cell texts of every visible table-like element.
/// arguments[0]: table selector, arguments[1]: cell selector
const COLLECT_TABLES_SCRIPT: &str = r#"
    const tableSelector = arguments[0];
    const cellSelector = arguments[1];

    function isVisible(el) {
        if (!el.isConnected || el.getClientRects().length === 0) return false;
        const rect = el.getBoundingClientRect();
        return rect.width > 0 || rect.height > 0;
    }

    return Array.from(document.querySelectorAll(tableSelector))
        .filter(isVisible)
        .map(table => Array.from(table.querySelectorAll(cellSelector))
            .map(cell => cell.textContent || ''));
"#;

#[derive(Debug, Deserialize)]
struct IdleState {
    ready_state: String,
    resources: u64,
}

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    /// Name of the WebDriver binary for this browser
    pub fn driver_name(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }

    /// Port an externally started driver usually listens on
    pub fn default_port(&self) -> u16 {
        match self {
            BrowserType::Firefox => 4444,
            BrowserType::Chrome => 9515,
        }
    }
}

/// Browser session driven over WebDriver, one page reused for every seed
pub struct Browser {
    client: Client,
    browser_type: BrowserType,
    // Removed when the browser is dropped
    _profile_dir: Option<TempDir>,
}

impl Browser {
    /// Start a browser session for a run
    pub async fn launch(config: &RunConfig) -> Result<Self> {
        let browser = Self::new(
            config.browser,
            config.viewport.clone(),
            config.headless,
            config.user_agent.clone(),
        )
        .await?;

        if let Err(e) = browser.client.update_timeouts(session_timeouts(config)).await {
            debug!("Note: Could not set page load timeout: {}", e);
        }

        Ok(browser)
    }

    /// Create a new browser instance
    ///
    /// # Arguments
    /// * `browser_type` - Firefox or Chrome
    /// * `viewport` - Optional viewport dimensions
    /// * `headless` - Whether to run in headless mode
    /// * `user_agent` - Optional user agent override
    pub async fn new(
        browser_type: BrowserType,
        viewport: Option<ViewportSize>,
        headless: bool,
        user_agent: Option<String>,
    ) -> Result<Self> {
        info!("Connecting to {:?} WebDriver", browser_type);

        // Ensure WebDriver is running (will auto-start if needed)
        let webdriver_url = GLOBAL_WEBDRIVER_MANAGER
            .ensure_driver(&browser_type)
            .await?;

        // Chrome refuses to share a profile directory between sessions
        let profile_dir = match browser_type {
            BrowserType::Chrome => Some(
                tempfile::Builder::new()
                    .prefix("tablesum-chrome-")
                    .tempdir()?,
            ),
            BrowserType::Firefox => None,
        };

        let caps = capabilities(
            browser_type,
            viewport.as_ref(),
            headless,
            user_agent.as_deref(),
            profile_dir.as_ref().map(TempDir::path),
        );

        debug!("Connecting to WebDriver at {}", webdriver_url);

        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(&webdriver_url)
            .await
            .with_context(|| format!("Failed to connect to WebDriver at {}", webdriver_url))?;

        // Set viewport size after connection if specified
        if let Some(vp) = viewport {
            debug!("Setting viewport to {}x{}", vp.width, vp.height);
            if let Err(e) = client.set_window_size(vp.width, vp.height).await {
                // Viewport setting is best-effort
                debug!("Note: Could not set window size: {}", e);
            }
        }

        Ok(Browser {
            client,
            browser_type,
            _profile_dir: profile_dir,
        })
    }

    pub fn browser_type(&self) -> BrowserType {
        self.browser_type
    }

    async fn goto_and_settle(&self, url: &str, idle_window: Duration) -> Result<(), SeedError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| SeedError::Navigation(e.to_string()))?;

        self.wait_for_network_idle(idle_window).await
    }

    /// Poll until the document is complete and no new resources have been
    /// fetched for `idle_window`. Callers bound this with a timeout.
    async fn wait_for_network_idle(&self, idle_window: Duration) -> Result<(), SeedError> {
        let mut last_count = None;
        let mut stable_since = Instant::now();

        loop {
            let value = self
                .client
                .execute(IDLE_STATE_SCRIPT, vec![])
                .await
                .map_err(|e| SeedError::Navigation(e.to_string()))?;
            let state: IdleState = serde_json::from_value(value)
                .map_err(|e| SeedError::Navigation(format!("idle check failed: {}", e)))?;

            if state.ready_state == "complete" {
                if last_count == Some(state.resources) {
                    if stable_since.elapsed() >= idle_window {
                        debug!("Network idle with {} resources loaded", state.resources);
                        return Ok(());
                    }
                } else {
                    last_count = Some(state.resources);
                    stable_since = Instant::now();
                }
            } else {
                last_count = None;
            }

            tokio::time::sleep(IDLE_POLL_INTERVAL).await;
        }
    }

    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

/// Driver-side page-load limit, kept in line with the navigation budget
fn session_timeouts(config: &RunConfig) -> TimeoutConfiguration {
    TimeoutConfiguration::new(None, Some(config.navigation_timeout()), None)
}

/// WebDriver capabilities for a new session
fn capabilities(
    browser_type: BrowserType,
    viewport: Option<&ViewportSize>,
    headless: bool,
    user_agent: Option<&str>,
    profile_dir: Option<&Path>,
) -> serde_json::Map<String, serde_json::Value> {
    let mut caps = serde_json::Map::new();

    match browser_type {
        BrowserType::Firefox => {
            let mut args = Vec::new();

            if headless {
                args.push("--headless".to_string());
            }

            if let Some(vp) = viewport {
                args.push(format!("--width={}", vp.width));
                args.push(format!("--height={}", vp.height));
            }

            let mut firefox_opts = json!({ "args": args });
            if let Some(ua) = user_agent {
                firefox_opts["prefs"] = json!({ "general.useragent.override": ua });
            }
            caps.insert("moz:firefoxOptions".to_string(), firefox_opts);
        }
        BrowserType::Chrome => {
            let mut args = vec!["--no-sandbox".to_string()];

            if headless {
                args.push("--headless=new".to_string());
                args.push("--disable-gpu".to_string());
                // Prevent shared memory issues
                args.push("--disable-dev-shm-usage".to_string());
            }

            if let Some(vp) = viewport {
                args.push(format!("--window-size={},{}", vp.width, vp.height));
            }

            if let Some(ua) = user_agent {
                args.push(format!("--user-agent={}", ua));
            }

            if let Some(dir) = profile_dir {
                args.push(format!("--user-data-dir={}", dir.display()));
            }

            caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        }
    }

    caps
}

impl ReportPage for Browser {
    async fn navigate(
        &self,
        url: &str,
        timeout: Duration,
        idle_window: Duration,
    ) -> Result<(), SeedError> {
        info!("Navigating to {}", url);

        match tokio::time::timeout(timeout, self.goto_and_settle(url, idle_window)).await {
            Ok(result) => result,
            Err(_) => Err(SeedError::NavigationTimeout(timeout.as_millis() as u64)),
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), SeedError> {
        debug!("Waiting up to {:?} for '{}'", timeout, selector);

        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(SeedError::SelectorTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn collect_tables(
        &self,
        table_selector: &str,
        cell_selector: &str,
    ) -> Result<Vec<TableSnapshot>, SeedError> {
        let value = self
            .client
            .execute(
                COLLECT_TABLES_SCRIPT,
                vec![json!(table_selector), json!(cell_selector)],
            )
            .await?;

        let tables: Vec<Vec<String>> = serde_json::from_value(value)?;
        debug!("Collected {} visible tables", tables.len());

        Ok(tables
            .into_iter()
            .map(|cells| TableSnapshot { cells })
            .collect())
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod webdriver_test;
