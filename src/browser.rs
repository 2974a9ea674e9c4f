// src/browser.rs
//
// Browser session manager.
//
// `ChromeLauncher` provisions a chromedriver process (or connects to an
// external WebDriver URL) and opens one Chrome session. The session owns
// both the WebDriver handle and the driver child process; `stop` releases
// them, and dropping an un-stopped session releases them too.
//
// thirtyfour is async; everything here is driven through a private
// single-worker runtime so the rest of the crate stays blocking and
// strictly sequential.

use std::{
    net::{SocketAddr, TcpStream},
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use log::{debug, info, warn};
use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;
use tokio::runtime::{Builder, Runtime};

use crate::config::consts::{CELL_TAG, MIN_COLUMNS, ROW_SELECTOR};
use crate::config::options::BrowserOptions;
use crate::error::{ScrapeError, TrackerError};
use crate::scrape::{RowCells, RowSource};

/// Starts page sessions. Swapped for a fake in pipeline tests.
pub trait Launcher {
    type Session: PageSession;
    fn start(&self, opts: &BrowserOptions) -> Result<Self::Session, TrackerError>;
}

/// A live page session. `stop` must be called once per successful start.
pub trait PageSession: RowSource {
    fn stop(self) -> Result<(), TrackerError>;
}

pub struct ChromeLauncher;

impl Launcher for ChromeLauncher {
    type Session = BrowserSession;

    fn start(&self, opts: &BrowserOptions) -> Result<BrowserSession, TrackerError> {
        BrowserSession::start(opts)
    }
}

pub struct BrowserSession {
    rt: Runtime,
    driver: Option<WebDriver>,
    child: Option<Child>,
}

impl BrowserSession {
    pub fn start(opts: &BrowserOptions) -> Result<Self, TrackerError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| TrackerError::Launch(format!("runtime: {e}")))?;

        let mut child = if opts.owns_driver() { Some(spawn_driver(opts)?) } else { None };

        if let Some(c) = child.as_mut() {
            if let Err(e) = wait_until_ready(c, opts.port, opts.ready_timeout) {
                kill(c);
                return Err(e);
            }
        }

        let url = opts.webdriver_url();
        match rt.block_on(open_session(&url, opts)) {
            Ok(driver) => {
                info!("Browser session started (headless: {})", opts.headless);
                Ok(Self { rt, driver: Some(driver), child })
            }
            Err(e) => {
                if let Some(c) = child.as_mut() { kill(c); }
                Err(TrackerError::Launch(format!("session at {url}: {e}")))
            }
        }
    }

    /// Quit the WebDriver session and kill the driver process. Idempotent.
    fn release(&mut self) -> Result<(), TrackerError> {
        let quit = match self.driver.take() {
            Some(driver) => self.rt.block_on(driver.quit()).map_err(TrackerError::from),
            None => Ok(()),
        };
        if let Some(mut c) = self.child.take() {
            kill(&mut c);
        }
        quit
    }
}

impl PageSession for BrowserSession {
    fn stop(mut self) -> Result<(), TrackerError> {
        let res = self.release();
        debug!("Browser session stopped");
        res
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if self.driver.is_some() || self.child.is_some() {
            warn!("Browser session dropped without stop; releasing");
            let _ = self.release();
        }
    }
}

impl RowSource for BrowserSession {
    fn load_rows(
        &mut self,
        url: &str,
        limit: usize,
        wait: Duration,
        poll: Duration,
    ) -> Result<Vec<RowCells>, ScrapeError> {
        let driver = self
            .driver
            .as_ref()
            .ok_or_else(|| ScrapeError::Driver(s!("session already stopped")))?;

        self.rt.block_on(async {
            driver.goto(url).await.map_err(|e| ScrapeError::Navigation {
                url: s!(url),
                reason: e.to_string(),
            })?;

            driver
                .query(By::Css(ROW_SELECTOR))
                .wait(wait, poll)
                .first()
                .await
                .map_err(|e| {
                    let timed_out = matches!(
                        &*e,
                        thirtyfour::error::WebDriverErrorInner::NoSuchElement(..)
                            | thirtyfour::error::WebDriverErrorInner::Timeout(..)
                    );
                    wait_error(timed_out, e.to_string(), wait)
                })?;

            let rows = driver
                .find_all(By::Css(ROW_SELECTOR))
                .await
                .map_err(|e| ScrapeError::Driver(e.to_string()))?;
            debug!("Page has {} rows, reading {}", rows.len(), limit.min(rows.len()));

            let mut out = Vec::with_capacity(limit.min(rows.len()));
            for row in rows.iter().take(limit) {
                out.push(row_cells(row).await);
            }
            Ok(out)
        })
    }
}

/* ---------------- helpers ---------------- */

async fn open_session(url: &str, opts: &BrowserOptions) -> WebDriverResult<WebDriver> {
    let mut caps = DesiredCapabilities::chrome();
    if opts.headless {
        caps.add_arg("--headless=new")?;
    }
    let (w, h) = opts.viewport;
    caps.add_arg(&format!("--window-size={w},{h}"))?;
    WebDriver::new(url, caps).await
}

/// Texts of the first cells of one row. Only the cells we map are read;
/// the count still tells the parser when a row is too short.
async fn row_cells(row: &WebElement) -> RowCells {
    let tds = row.find_all(By::Tag(CELL_TAG)).await.map_err(|e| e.to_string())?;
    let mut cells = Vec::with_capacity(MIN_COLUMNS);
    for td in tds.iter().take(MIN_COLUMNS) {
        cells.push(td.text().await.map_err(|e| e.to_string())?);
    }
    Ok(cells)
}

/// Only "nothing showed up in time" is a timeout; a dead session or bad
/// selector keeps its own message.
fn wait_error(timed_out: bool, detail: String, wait: Duration) -> ScrapeError {
    if timed_out { ScrapeError::Timeout(wait) } else { ScrapeError::Driver(detail) }
}

fn spawn_driver(opts: &BrowserOptions) -> Result<Child, TrackerError> {
    debug!("Spawning {} on port {}", opts.driver_bin.display(), opts.port);
    Command::new(&opts.driver_bin)
        .arg(format!("--port={}", opts.port))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| TrackerError::Launch(format!("{}: {e}", opts.driver_bin.display())))
}

/// Block until the driver accepts TCP connections, or it exits, or the bound passes.
fn wait_until_ready(child: &mut Child, port: u16, bound: Duration) -> Result<(), TrackerError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let deadline = Instant::now() + bound;

    loop {
        if TcpStream::connect_timeout(&addr, Duration::from_millis(250)).is_ok() {
            return Ok(());
        }
        if let Ok(Some(status)) = child.try_wait() {
            return Err(TrackerError::Launch(format!("driver exited early ({status})")));
        }
        if Instant::now() >= deadline {
            return Err(TrackerError::Launch(format!(
                "driver not listening on port {port} after {}ms",
                bound.as_millis()
            )));
        }
        thread::sleep(Duration::from_millis(100));
    }
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("Driver kill: {e}");
    }
    let _ = child.wait();
}
