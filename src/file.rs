// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::csv::write_row;

/// Create `dir` (and parents) unless it already exists as a directory.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Ensure the parent of `path` exists (no-op for bare file names).
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// Create/truncate `path` and write the header line.
pub fn write_rows_start(path: &Path, headers: &[String], sep: char) -> io::Result<()> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    write_row(&mut out, headers, sep)?;
    out.flush()
}

/// Append rows to an existing file (must be created already).
pub fn append_rows(path: &Path, rows: &[Vec<String>], sep: char) -> io::Result<()> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut out = BufWriter::new(file);
    for row in rows {
        write_row(&mut out, row, sep)?;
    }
    out.flush()
}
