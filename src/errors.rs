use thiserror::Error;

/// Failure while processing a single seed.
///
/// These never abort a run: the harvester records the message against the
/// seed and moves on to the next one.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Navigation plus network-idle wait exceeded the configured budget
    #[error("Navigation timeout of {0} ms exceeded")]
    NavigationTimeout(u64),
    /// The browser refused or failed the navigation itself
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// A table selector did not show up in time
    #[error("Selector '{selector}' not found within {timeout_ms} ms")]
    SelectorTimeout { selector: String, timeout_ms: u64 },
    /// Reading tables out of the loaded page failed
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

impl From<fantoccini::error::CmdError> for SeedError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        SeedError::Extraction(err.to_string())
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::Extraction(format!("unexpected page response: {}", err))
    }
}
