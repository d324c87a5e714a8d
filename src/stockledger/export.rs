//! CSV export of the full ledger snapshot.
//!
//! One header row (`Product,Count,Time`) followed by one row per record in ledger order.
//! Files start with a UTF-8 byte-order mark so spreadsheet tools read non-ASCII product
//! names correctly.

use crate::error::{LedgerError, Result};
use crate::model::StockRecord;
use chrono::NaiveDateTime;
use log::info;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const EXPORT_HEADER: [&str; 3] = ["Product", "Count", "Time"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Numbered variants tried when an export with the same timestamp already exists.
const MAX_NAME_SUFFIX: usize = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The ledger was empty; no file was created.
    NoData,
    Written(PathBuf),
}

pub fn export_filename(at: NaiveDateTime) -> String {
    numbered_filename(at, 0)
}

fn numbered_filename(at: NaiveDateTime, n: usize) -> String {
    let stem = format!("export_{}", at.format("%Y%m%d_%H%M%S"));
    if n == 0 {
        format!("{}.csv", stem)
    } else {
        format!("{}_{}.csv", stem, n)
    }
}

/// Write `records` as a CSV file in `dest_dir`, named after `at`.
///
/// Existing exports are never overwritten: a clash gets a `_1`, `_2`, ... suffix.
pub fn export_csv(
    records: &[StockRecord],
    dest_dir: &Path,
    at: NaiveDateTime,
) -> Result<ExportOutcome> {
    if records.is_empty() {
        return Ok(ExportOutcome::NoData);
    }

    fs::create_dir_all(dest_dir).map_err(|source| LedgerError::ExportIo {
        path: dest_dir.to_path_buf(),
        source,
    })?;
    let (path, file) = create_unique(dest_dir, at)?;

    if let Err(source) = write_file(file, records) {
        let _ = fs::remove_file(&path);
        return Err(LedgerError::ExportIo { path, source });
    }

    info!("exported {} records to {}", records.len(), path.display());
    Ok(ExportOutcome::Written(path))
}

fn create_unique(dest_dir: &Path, at: NaiveDateTime) -> Result<(PathBuf, File)> {
    for n in 0..=MAX_NAME_SUFFIX {
        let path = dest_dir.join(numbered_filename(at, n));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(LedgerError::ExportIo { path, source }),
        }
    }
    Err(LedgerError::ExportIo {
        path: dest_dir.join(export_filename(at)),
        source: io::Error::new(
            io::ErrorKind::AlreadyExists,
            "too many exports with the same timestamp",
        ),
    })
}

fn write_file(file: File, records: &[StockRecord]) -> io::Result<()> {
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM)?;
    write_csv(&mut out, records)?;
    out.flush()
}

/// Write the header and one row per record to any writer. No byte-order mark.
pub fn write_csv<W: Write>(writer: W, records: &[StockRecord]) -> io::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADER)?;
    for record in records {
        csv.write_record([
            record.product_name.as_str(),
            &record.count.to_string(),
            &record.timestamp_string(),
        ])?;
    }
    csv.flush()
}
