//! CSV persistence for flattened contributors
//!
//! Columns are fixed: `id,nucCode,name,parentId,totalItems`. Absent optional
//! values are written as empty fields.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::flatten::FlatRecord;

/// Header row, in column order
pub const COLUMNS: [&str; 5] = ["id", "nucCode", "name", "parentId", "totalItems"];

/// Serialized row; field order defines column order
#[derive(Serialize)]
struct FlatRow<'a> {
    id: &'a str,
    nuc_code: Option<&'a str>,
    name: &'a str,
    parent_id: Option<&'a str>,
    total_items: u64,
}

impl<'a> From<&'a FlatRecord> for FlatRow<'a> {
    fn from(record: &'a FlatRecord) -> Self {
        Self {
            id: &record.id,
            nuc_code: record.nuc_code.as_deref(),
            name: &record.name,
            parent_id: record.parent_id.as_deref(),
            total_items: record.total_items,
        }
    }
}

/// Write records as CSV, header first, one row per record
pub fn write_records<W: Write>(writer: W, records: &[FlatRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Explicit header so an empty harvest still yields a valid table
    csv_writer.write_record(COLUMNS)?;
    for record in records {
        csv_writer.serialize(FlatRow::from(record))?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write records to `path` atomically.
///
/// Rows go to a `.partial` sibling that is renamed over `path` only once
/// fully written, so readers never observe a truncated table.
pub fn write_csv(path: &Path, records: &[FlatRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let partial = partial_path(path);
    let result = File::create(&partial)
        .map_err(Into::into)
        .and_then(|file| write_records(io::BufWriter::new(file), records))
        .and_then(|()| fs::rename(&partial, path).map_err(Into::into));

    if result.is_err() {
        if let Err(e) = fs::remove_file(&partial) {
            log::warn!("Failed to remove {}: {}", partial.display(), e);
        }
    } else {
        log::info!("Wrote {} records to {}", records.len(), path.display());
    }

    result
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
