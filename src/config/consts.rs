// src/config/consts.rs

// Target page
pub const TARGET_URL: &str = "https://coinmarketcap.com/";
pub const ROW_SELECTOR: &str = "tbody tr";
pub const CELL_TAG: &str = "td";

// Scrape
pub const ROW_LIMIT: usize = 10;
pub const MIN_COLUMNS: usize = 7;
pub const WAIT_SECS: u64 = 25;
pub const POLL_MS: u64 = 500;

// Browser / driver
pub const DRIVER_BIN: &str = "chromedriver";
pub const DRIVER_PORT: u16 = 9515;
pub const DRIVER_READY_SECS: u64 = 5;
pub const VIEWPORT_W: u32 = 1920;
pub const VIEWPORT_H: u32 = 1080;

// Export
pub const DEFAULT_CSV_FILE: &str = "crypto_prices_v2.csv";
pub const CSV_SEP: char = ',';

// Report
pub const MOVERS: usize = 3;

// Local debug log
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
