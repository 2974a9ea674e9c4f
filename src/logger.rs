// src/logger.rs
//
// `log` backend that appends to a local debug file:
//   [HH:MM:SS.mmm][LEVEL] message
// Elapsed time is measured from `init`. Console output stays with Progress.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

use crate::config::consts::{LOG_FILE, STORE_DIR};
use crate::file::ensure_parent;

pub struct FileLogger {
    path: PathBuf,
    start: Instant,
    lock: Mutex<()>,
}

impl FileLogger {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf(), start: Instant::now(), lock: Mutex::new(()) }
    }

    fn line(&self, record: &Record) -> String {
        let elapsed = fmt_elapsed(self.start.elapsed().as_millis());
        format!("[{elapsed}][{}] {}\n", record.level(), record.args())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) { return; }
        let line = self.line(record);

        if let Ok(_guard) = self.lock.lock() {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

/// `<STORE_DIR>/<LOG_FILE>`, relative to the working directory.
pub fn log_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(LOG_FILE)
}

/// Install the file logger as the global `log` backend.
pub fn init(path: &Path, level: LevelFilter) -> io::Result<()> {
    ensure_parent(path)?;
    log::set_boxed_logger(Box::new(FileLogger::new(path)))
        .map_err(|e| io::Error::other(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}
