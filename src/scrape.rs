// src/scrape.rs
//
// Page rows → PriceRecords.
//
// The browser sits behind `RowSource`: "load the page, wait for rows, give
// me the first N rows as cell texts". Everything after that is pure and
// runs against fixture rows in tests.
//
// Row layout (cells, in page order):
//   0 Rank | 1 Name "\n" Symbol | 2 Price | 3 1h | 4 24h | 5 7d | 6 Market Cap | ...

use std::time::Duration;

use chrono::{DateTime, Local};
use log::debug;

use crate::config::consts::MIN_COLUMNS;
use crate::config::options::ScrapeOptions;
use crate::core::first_line;
use crate::data::PriceRecord;
use crate::error::ScrapeError;

/// Cell texts of one row, or why they could not be read (stale element, …).
pub type RowCells = Result<Vec<String>, String>;

pub trait RowSource {
    /// Navigate to `url`, block up to `wait` until at least one row exists,
    /// then return at most `limit` rows in document order.
    fn load_rows(
        &mut self,
        url: &str,
        limit: usize,
        wait: Duration,
        poll: Duration,
    ) -> Result<Vec<RowCells>, ScrapeError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    TooFewCells { found: usize },
    Extraction(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    /// Position among the returned rows (0-based).
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeReport {
    pub captured_at: String,
    pub records: Vec<PriceRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl ScrapeReport {
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

pub fn timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One row → record. Extra cells beyond the seventh are ignored.
pub fn parse_row(cells: RowCells, captured_at: &str) -> Result<PriceRecord, SkipReason> {
    let cells = cells.map_err(SkipReason::Extraction)?;
    if cells.len() < MIN_COLUMNS {
        return Err(SkipReason::TooFewCells { found: cells.len() });
    }
    let mut it = cells.into_iter();
    let mut next = || it.next().unwrap_or_default();

    let rank = next();
    let name = s!(first_line(&next()));
    Ok(PriceRecord {
        captured_at: s!(captured_at),
        rank,
        name,
        price: next(),
        change_1h: next(),
        change_24h: next(),
        change_7d: next(),
        market_cap: next(),
    })
}

/// Split raw rows into records and skips. Never fails; a bad row only drops itself.
pub fn collect(rows: Vec<RowCells>, captured_at: &str) -> ScrapeReport {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (index, cells) in rows.into_iter().enumerate() {
        match parse_row(cells, captured_at) {
            Ok(rec) => records.push(rec),
            Err(reason) => {
                debug!("Row {index} skipped: {reason:?}");
                skipped.push(SkippedRow { index, reason });
            }
        }
    }

    ScrapeReport { captured_at: s!(captured_at), records, skipped }
}

/// Load the target page through `source` and parse the first rows.
/// Zero usable rows is a valid, empty report; an `Err` means the page
/// itself could not be read (timeout, navigation).
pub fn fetch(
    source: &mut dyn RowSource,
    opts: &ScrapeOptions,
    captured_at: &str,
) -> Result<ScrapeReport, ScrapeError> {
    let mut rows = source.load_rows(&opts.url, opts.limit, opts.wait, opts.poll)?;
    rows.truncate(opts.limit);
    Ok(collect(rows, captured_at))
}
