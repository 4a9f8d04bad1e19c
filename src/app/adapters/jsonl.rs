//! JSON-lines file adapter for the CLI surface.
//!
//! Readings come in and results go out as one JSON object per line. This is
//! the only place the engines touch the filesystem; everything else receives
//! and returns in-memory values.

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Read a JSON-lines file into a vector of records
///
/// Blank lines are skipped; any malformed line fails the whole read with its
/// line number in the error context.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open '{}'", path.display()), e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|e| Error::io(format!("failed to read '{}'", path.display()), e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            Error::json(
                path.display().to_string(),
                format!("malformed record on line {}", line_number + 1),
                Some(e),
            )
        })?;
        records.push(record);
    }

    debug!(count = records.len(), path = %path.display(), "read JSONL records");
    Ok(records)
}

/// Write records to a JSON-lines file, one object per line
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create '{}'", path.display()), e))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let line = serde_json::to_string(record).map_err(|e| {
            Error::json(
                path.display().to_string(),
                "failed to serialize record",
                Some(e),
            )
        })?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(|e| Error::io(format!("failed to write '{}'", path.display()), e))?;
    }
    writer
        .flush()
        .map_err(|e| Error::io(format!("failed to flush '{}'", path.display()), e))?;

    debug!(count = records.len(), path = %path.display(), "wrote JSONL records");
    Ok(())
}
