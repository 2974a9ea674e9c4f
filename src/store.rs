// src/store.rs
//
// Append-only CSV history. Header on first creation only; every run's rows
// are appended verbatim (no keys, no dedup, no locking).

use std::{fs, path::{Path, PathBuf}};

use log::{debug, info};

use crate::config::consts::CSV_SEP;
use crate::csv::parse_rows;
use crate::data::{Column, PriceTable};
use crate::error::TrackerError;
use crate::file::{append_rows, write_rows_start};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistOutcome {
    pub path: PathBuf,
    /// The file did not exist and was created with a header.
    pub created: bool,
    pub rows_written: usize,
}

/// Contents of a history file: header (if any) + data rows.
#[derive(Clone, Debug, Default)]
pub struct History {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

pub fn persist(path: &Path, table: &PriceTable) -> Result<PersistOutcome, TrackerError> {
    let created = !path.exists();
    if created {
        write_rows_start(path, &Column::headers(), CSV_SEP)?;
        debug!("Created {} with header", path.display());
    }
    append_rows(path, &table.to_string_rows(), CSV_SEP)?;
    info!("Wrote {} rows to {}", table.len(), path.display());

    Ok(PersistOutcome { path: path.to_path_buf(), created, rows_written: table.len() })
}

/// Read a history file back. The first row counts as header when it starts
/// with the `Time` column name.
pub fn load_rows(path: &Path) -> Result<History, TrackerError> {
    let text = fs::read_to_string(path)?;
    let mut rows = parse_rows(&text, CSV_SEP);
    let has_header = rows
        .first()
        .and_then(|r| r.first())
        .is_some_and(|c| c == Column::Time.header());
    let headers = if has_header { Some(rows.remove(0)) } else { None };
    Ok(History { headers, rows })
}
