// src/runner.rs
//
// One run:
//   start browser → fetch → stop browser
//     → empty?            END (NoData)
//     → show → filter → empty?  END (FilterEmpty)
//                      → persist → movers  END (Completed)
//
// The browser is stopped right after the fetch, before any branch, so every
// terminal state is reached with the session released.

use std::thread;

use chrono::Local;
use log::{info, warn};

use crate::{
    analyze::{self, Movers},
    browser::{Launcher, PageSession},
    config::options::AppOptions,
    data::Column,
    error::{ScrapeError, TrackerError},
    filter::{self, Filtered},
    progress::Progress,
    scrape::{self, timestamp},
    store::{self, PersistOutcome},
    table,
};

#[derive(Debug)]
pub enum NoData {
    /// Page loaded but no row had enough cells.
    EmptyPage { skipped: usize },
    /// Page could not be read (timeout, navigation, driver).
    Fetch(ScrapeError),
}

#[derive(Debug)]
pub enum RunOutcome {
    NoData(NoData),
    FilterEmpty,
    Completed { saved: PersistOutcome, movers: Movers },
}

/// Run the pipeline `opts.schedule.runs` times, pausing `interval` between runs.
/// A launch failure aborts the whole schedule.
pub fn run<L: Launcher>(
    launcher: &L,
    opts: &AppOptions,
    progress: &mut dyn Progress,
) -> Result<Vec<RunOutcome>, TrackerError> {
    let runs = opts.schedule.runs.max(1);
    let mut outcomes = Vec::with_capacity(runs as usize);

    for i in 0..runs {
        if runs > 1 {
            progress.log(&format!("\n--- Run {}/{} ---", i + 1, runs));
        }
        outcomes.push(run_once(launcher, opts, progress)?);

        if i + 1 < runs && !opts.schedule.interval.is_zero() {
            progress.log(&format!("\nNext run in {}s", opts.schedule.interval.as_secs()));
            thread::sleep(opts.schedule.interval);
        }
    }
    Ok(outcomes)
}

pub fn run_once<L: Launcher>(
    launcher: &L,
    opts: &AppOptions,
    progress: &mut dyn Progress,
) -> Result<RunOutcome, TrackerError> {
    let mut session = launcher.start(&opts.browser)?;

    progress.log("\nFetching data...");
    let captured_at = timestamp(Local::now());
    let fetched = scrape::fetch(&mut session, &opts.scrape, &captured_at);

    if let Err(e) = session.stop() {
        warn!("Browser shutdown: {e}");
    }

    let report = match fetched {
        Ok(r) if !r.is_empty() => r,
        Ok(r) => {
            info!("No usable rows ({} skipped)", r.skipped.len());
            progress.log("No data fetched. Site layout may have changed.");
            return Ok(RunOutcome::NoData(NoData::EmptyPage { skipped: r.skipped.len() }));
        }
        Err(e) => {
            warn!("Fetch failed: {e}");
            progress.log("No data fetched. Site layout may have changed.");
            return Ok(RunOutcome::NoData(NoData::Fetch(e)));
        }
    };
    info!("Scraped {} rows ({} skipped)", report.records.len(), report.skipped.len());

    let tbl = table::format(report.records);
    progress.report("LIVE CRYPTO DATA", &table::render_table(&tbl));

    let tbl = match filter::apply(tbl, &opts.filter) {
        Filtered::Aborted { table, reason } => {
            progress.log(&format!("Filter error ({reason}). Showing full data."));
            table
        }
        other => other.into_table(),
    };

    if tbl.is_empty() {
        progress.log("\nNo data matched your filter.");
        return Ok(RunOutcome::FilterEmpty);
    }
    progress.report("FILTERED DATA", &table::render_table(&tbl));

    let saved = store::persist(&opts.export.out_path, &tbl)?;
    match store::load_rows(&saved.path) {
        Ok(h) => progress.log(&format!("\nSaved to {} ({} rows on file)", saved.path.display(), h.rows.len())),
        Err(_) => progress.log(&format!("\nSaved to {}", saved.path.display())),
    }

    let movers = analyze::analyze(&tbl);
    let cols = [Column::Name, Column::Change24h];
    progress.report("TOP 3 GAINERS (24H)", &table::render(&movers.gainers, &cols));
    progress.report("TOP 3 LOSERS (24H)", &table::render(&movers.losers, &cols));

    Ok(RunOutcome::Completed { saved, movers })
}
