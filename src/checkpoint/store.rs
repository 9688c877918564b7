//! Durable CSV persistence for the working table.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error_handling::CheckpointError;

use super::{AddressTable, TableSchema};

/// Reads and writes the table file.
///
/// Saves go to a temporary file next to the table and are renamed over it,
/// so an interrupted write leaves the previous checkpoint intact.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
    schema: TableSchema,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>, schema: TableSchema) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole table.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid UTF-8 CSV with a
    /// consistent column count, lacks a required column, or holds a
    /// non-numeric coordinate.
    pub fn load(&self) -> Result<AddressTable, CheckpointError> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| self.csv_error(e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.csv_error(e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let table = AddressTable::from_rows(&self.schema, headers, rows)?;
        debug!(
            "Loaded {} records ({} columns) from {}",
            table.len(),
            table.headers().len(),
            self.path.display()
        );
        Ok(table)
    }

    /// Writes the table, replacing the previous copy atomically.
    ///
    /// Saving an unchanged table produces byte-identical output.
    pub fn save(&self, table: &AddressTable) -> Result<(), CheckpointError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;

        // The temp file is created 0600; keep the table's own permissions
        if let Ok(metadata) = fs::metadata(&self.path) {
            let _ = tmp.as_file().set_permissions(metadata.permissions());
        }

        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            writer
                .write_record(table.headers())
                .map_err(|e| self.csv_error(e))?;
            for row in table.rows() {
                writer.write_record(&row).map_err(|e| self.csv_error(e))?;
            }
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;

        tmp.persist(&self.path)
            .map_err(|e| CheckpointError::Persist {
                path: self.path.clone(),
                source: e,
            })?;
        debug!("Saved {} records to {}", table.len(), self.path.display());
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> CheckpointError {
        CheckpointError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> CheckpointError {
        CheckpointError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}
