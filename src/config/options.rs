// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Everything a run needs to know, decided up front (flags + prompts).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub browser: BrowserOptions,
    pub scrape: ScrapeOptions,
    pub filter: FilterCriteria,
    pub export: ExportOptions,
    pub schedule: ScheduleOptions,
    pub debug: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserOptions {
    pub headless: bool,
    /// Driver binary to spawn when no external WebDriver URL is given.
    pub driver_bin: PathBuf,
    pub port: u16,
    /// Connect to an already running WebDriver instead of spawning one.
    pub driver_url: Option<String>,
    pub viewport: (u32, u32),
    /// How long a spawned driver gets to start listening.
    pub ready_timeout: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            driver_bin: PathBuf::from(DRIVER_BIN),
            port: DRIVER_PORT,
            driver_url: None,
            viewport: (VIEWPORT_W, VIEWPORT_H),
            ready_timeout: Duration::from_secs(DRIVER_READY_SECS),
        }
    }
}

impl BrowserOptions {
    pub fn webdriver_url(&self) -> String {
        match &self.driver_url {
            Some(url) => url.clone(),
            None => join!("http://127.0.0.1:", &self.port.to_string()),
        }
    }

    pub fn owns_driver(&self) -> bool {
        self.driver_url.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub url: String,
    pub limit: usize,
    pub wait: Duration,
    pub poll: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url: s!(TARGET_URL),
            limit: ROW_LIMIT,
            wait: Duration::from_secs(WAIT_SECS),
            poll: Duration::from_millis(POLL_MS),
        }
    }
}

/// Raw user thresholds. Kept as strings: parsing (and failing) is the
/// filter's job, and an empty string means "no constraint".
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub enabled: bool,
    pub min_price: String,
    pub min_change: String,
}

impl FilterCriteria {
    pub fn new(min_price: &str, min_change: &str) -> Self {
        Self { enabled: true, min_price: s!(min_price), min_change: s!(min_change) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_path: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_path: PathBuf::from(DEFAULT_CSV_FILE) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleOptions {
    pub runs: u32,
    pub interval: Duration,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self { runs: 1, interval: Duration::from_secs(0) }
    }
}
