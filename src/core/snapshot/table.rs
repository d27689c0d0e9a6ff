//! CSV encoding of the snapshot tables.
//!
//! Headers are written explicitly so an empty table still carries its
//! columns. `None` dates become empty fields and read back as `None`.

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::errors::PipelineError;

/// Encode rows under the given headers
pub fn write_rows<W: Write, T: Serialize>(
    writer: W,
    columns: &[&str],
    rows: &[T],
) -> Result<(), PipelineError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Encode rows into an in-memory CSV document
pub fn encode_rows<T: Serialize>(columns: &[&str], rows: &[T]) -> Result<Vec<u8>, PipelineError> {
    let mut buffer = Vec::new();
    write_rows(&mut buffer, columns, rows)?;
    Ok(buffer)
}

/// Decode rows, rejecting a document whose headers differ from `columns`
pub fn read_rows<T: DeserializeOwned>(
    data: impl std::io::Read,
    columns: &[&str],
    origin: &Path,
) -> Result<Vec<T>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(data);
    let headers = reader.headers()?;
    if !headers.iter().eq(columns.iter().copied()) {
        return Err(PipelineError::UnexpectedColumns {
            path: origin.to_path_buf(),
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Write a table file, replacing any previous one
pub fn write_table<T: Serialize>(
    path: &Path,
    columns: &[&str],
    rows: &[T],
) -> Result<(), PipelineError> {
    let file = File::create(path)?;
    write_rows(file, columns, rows)?;
    info!("Created {} with {} records.", path.display(), rows.len());
    Ok(())
}

/// Load a table file; a missing file is reported as `MissingInput`
pub fn read_table<T: DeserializeOwned>(
    path: &Path,
    columns: &[&str],
) -> Result<Vec<T>, PipelineError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(PipelineError::MissingInput(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };
    let rows = read_rows(file, columns, path)?;
    info!("Loaded {} records from {}", rows.len(), path.display());
    Ok(rows)
}
