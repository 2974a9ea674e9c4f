// src/error.rs
use std::time::Duration;

use thiserror::Error;

use crate::data::Column;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Browser or driver could not be provisioned. Always fatal.
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Page-level failures. The runner treats every one of these as "no data".
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Timed out after {}s waiting for table rows", .0.as_secs())]
    Timeout(Duration),

    #[error("Could not load {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Driver error while reading rows: {0}")]
    Driver(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Minimum {column} is not a number: {value:?}")]
    InvalidThreshold { column: Column, value: String },

    #[error("Row {row}: {column} value {value:?} is not numeric")]
    UnparseableField { row: usize, column: Column, value: String },
}
