// tests/pipeline.rs
//
// Whole-run behavior against a scripted browser: every exit path stops the
// session exactly once, and only completed runs touch the CSV file.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crypto_tracker::browser::{Launcher, PageSession};
use crypto_tracker::config::options::{AppOptions, BrowserOptions, FilterCriteria};
use crypto_tracker::progress::{NullProgress, RecordingProgress};
use crypto_tracker::runner::{self, NoData, RunOutcome};
use crypto_tracker::scrape::{RowCells, RowSource};
use crypto_tracker::{ScrapeError, TrackerError};

#[derive(Clone)]
enum Script {
    Rows(Vec<RowCells>),
    Timeout,
    LaunchFails,
}

struct FakeLauncher {
    script: Script,
    starts: Rc<Cell<u32>>,
    stops: Rc<Cell<u32>>,
}

struct FakeSession {
    script: Script,
    stops: Rc<Cell<u32>>,
}

impl FakeLauncher {
    fn new(script: Script) -> Self {
        Self { script, starts: Rc::default(), stops: Rc::default() }
    }
}

impl Launcher for FakeLauncher {
    type Session = FakeSession;

    fn start(&self, _opts: &BrowserOptions) -> Result<FakeSession, TrackerError> {
        if let Script::LaunchFails = self.script {
            return Err(TrackerError::Launch("chromedriver: not found".into()));
        }
        self.starts.set(self.starts.get() + 1);
        Ok(FakeSession { script: self.script.clone(), stops: Rc::clone(&self.stops) })
    }
}

impl RowSource for FakeSession {
    fn load_rows(&mut self, _url: &str, _limit: usize, wait: Duration, _poll: Duration)
        -> Result<Vec<RowCells>, ScrapeError>
    {
        match &self.script {
            Script::Rows(rows) => Ok(rows.clone()),
            _ => Err(ScrapeError::Timeout(wait)),
        }
    }
}

impl PageSession for FakeSession {
    fn stop(self) -> Result<(), TrackerError> {
        self.stops.set(self.stops.get() + 1);
        Ok(())
    }
}

fn row(rank: &str, name: &str, price: &str, change_24h: &str) -> RowCells {
    Ok(vec![
        rank.into(),
        format!("{name}\n{}", &name[..3].to_uppercase()),
        price.into(),
        "0.10%".into(),
        change_24h.into(),
        "1.00%".into(),
        "$1,000,000".into(),
    ])
}

fn market() -> Vec<RowCells> {
    vec![
        row("1", "Bitcoin", "$67,012.55", "-1.30%"),
        row("2", "Ethereum", "$2,410.10", "3.20%"),
        Err("stale element reference".into()),
        row("4", "Solana", "$150.00", "8.75%"),
        row("5", "Dogecoin", "$0.12", "-4.00%"),
    ]
}

fn opts(name: &str, filter: FilterCriteria) -> AppOptions {
    let mut dir = std::env::temp_dir();
    dir.push(format!("crypto_tracker_pipeline_{}", name));
    let _ = fs::remove_dir_all(&dir);
    let mut o = AppOptions::default();
    o.export.out_path = dir.join("prices.csv");
    o.filter = filter;
    o
}

fn out_path(o: &AppOptions) -> PathBuf { o.export.out_path.clone() }

#[test]
fn empty_page_short_circuits_and_stops_browser() {
    let launcher = FakeLauncher::new(Script::Rows(vec![Ok(vec!["1".into(), "x".into()])]));
    let o = opts("empty", FilterCriteria::new("1", ""));
    let mut progress = RecordingProgress::default();

    let out = runner::run_once(&launcher, &o, &mut progress).unwrap();

    assert!(matches!(out, RunOutcome::NoData(NoData::EmptyPage { skipped: 1 })));
    assert_eq!(launcher.stops.get(), 1);
    assert!(!out_path(&o).exists());
    assert!(progress.lines.iter().any(|l| l.contains("No data fetched")));
    assert!(progress.reports.is_empty());
}

#[test]
fn timeout_is_no_data_and_stops_browser() {
    let launcher = FakeLauncher::new(Script::Timeout);
    let o = opts("timeout", FilterCriteria::disabled());

    let out = runner::run_once(&launcher, &o, &mut NullProgress).unwrap();

    assert!(matches!(out, RunOutcome::NoData(NoData::Fetch(ScrapeError::Timeout(_)))));
    assert_eq!(launcher.stops.get(), 1);
    assert!(!out_path(&o).exists());
}

#[test]
fn launch_failure_is_fatal() {
    let launcher = FakeLauncher::new(Script::LaunchFails);
    let o = opts("launch", FilterCriteria::disabled());

    let err = runner::run(&launcher, &o, &mut NullProgress).unwrap_err();

    assert!(matches!(err, TrackerError::Launch(_)));
    assert_eq!(launcher.stops.get(), 0);
}

#[test]
fn completed_run_saves_and_ranks() {
    let launcher = FakeLauncher::new(Script::Rows(market()));
    let o = opts("complete", FilterCriteria::disabled());
    let mut progress = RecordingProgress::default();

    let out = runner::run_once(&launcher, &o, &mut progress).unwrap();

    let RunOutcome::Completed { saved, movers } = out else { panic!("expected completion") };
    assert!(saved.created);
    assert_eq!(saved.rows_written, 4);
    assert_eq!(launcher.stops.get(), 1);

    let gainers: Vec<&str> = movers.gainers.iter().map(|r| r.name.as_str()).collect();
    let losers: Vec<&str> = movers.losers.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(gainers, ["Solana", "Ethereum", "Bitcoin"]);
    assert_eq!(losers, ["Dogecoin", "Bitcoin", "Ethereum"]);

    let titles: Vec<&str> = progress.reports.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(titles, ["LIVE CRYPTO DATA", "FILTERED DATA", "TOP 3 GAINERS (24H)", "TOP 3 LOSERS (24H)"]);
    let gainers_body = &progress.reports[2].1;
    assert!(gainers_body.contains("Solana"));
    assert!(gainers_body.contains("8.75%"));
    assert!(!gainers_body.contains("$150.00"));
}

#[test]
fn filter_keeps_matching_rows_only() {
    let launcher = FakeLauncher::new(Script::Rows(market()));
    let o = opts("filtered", FilterCriteria::new("100", ""));

    let out = runner::run_once(&launcher, &o, &mut NullProgress).unwrap();

    let RunOutcome::Completed { saved, .. } = out else { panic!("expected completion") };
    assert_eq!(saved.rows_written, 3);
    let text = fs::read_to_string(&saved.path).unwrap();
    assert!(!text.contains("Dogecoin"));
}

#[test]
fn invalid_threshold_falls_back_to_full_table() {
    let launcher = FakeLauncher::new(Script::Rows(market()));
    let o = opts("badfilter", FilterCriteria::new("abc", ""));
    let mut progress = RecordingProgress::default();

    let out = runner::run_once(&launcher, &o, &mut progress).unwrap();

    let RunOutcome::Completed { saved, .. } = out else { panic!("expected completion") };
    assert_eq!(saved.rows_written, 4);
    assert!(progress.lines.iter().any(|l| l.contains("Filter error")));
}

#[test]
fn filter_to_nothing_writes_nothing() {
    let launcher = FakeLauncher::new(Script::Rows(market()));
    let o = opts("nomatch", FilterCriteria::new("", "50"));
    let mut progress = RecordingProgress::default();

    let out = runner::run_once(&launcher, &o, &mut progress).unwrap();

    assert!(matches!(out, RunOutcome::FilterEmpty));
    assert!(!out_path(&o).exists());
    assert_eq!(launcher.stops.get(), 1);
    assert!(progress.lines.iter().any(|l| l.contains("No data matched your filter")));
}

#[test]
fn repeated_runs_append_to_one_file() {
    let launcher = FakeLauncher::new(Script::Rows(market()));
    let mut o = opts("repeat", FilterCriteria::disabled());
    o.schedule.runs = 3;

    let outcomes = runner::run(&launcher, &o, &mut NullProgress).unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(launcher.starts.get(), 3);
    assert_eq!(launcher.stops.get(), 3);
    let text = fs::read_to_string(out_path(&o)).unwrap();
    assert_eq!(text.lines().count(), 1 + 3 * 4);
}
