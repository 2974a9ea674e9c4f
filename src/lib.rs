// src/lib.rs

#[macro_use]
pub mod macros;

pub mod analyze;
pub mod browser;
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod filter;
pub mod logger;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;
pub mod table;

pub use error::{FilterError, ScrapeError, TrackerError};
