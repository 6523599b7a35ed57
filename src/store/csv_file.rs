//! The CSV backing file: initialization, migration, loads, and rewrites.
//!
//! Earlier versions of this tool disagreed about the file shape: the
//! first ones had no `Id` or `Grant Date` column and stored dates as
//! pre-rendered display strings. [`CsvStore::initialize`] migrates any of
//! those shapes to the canonical header and ISO dates in a single rewrite
//! at startup; everything after that reads and writes only the canonical
//! form.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::domain::dates;
use crate::domain::{LodgeRecord, RecordId};
use crate::error::LedgerError;
use crate::store::row::CsvRow;

/// Canonical column header of the backing file.
pub const EXPECTED_HEADER: [&str; 6] = [
    "Id",
    "Name",
    "Occupation",
    "Lodge Date",
    "Grant Date",
    "Comments",
];

/// File-backed record store.
///
/// All mutations rewrite through a temp file and rename, so a crash
/// mid-write never leaves a half-written table behind.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Creates a store over the given backing-file path. The file itself
    /// is not touched until [`CsvStore::initialize`] or a write.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the backing-file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the backing file exists with the canonical header.
    ///
    /// A missing file is created empty. An existing file written by an
    /// older version (missing `Id` or `Grant Date` column, display-string
    /// dates) is migrated and rewritten once. A file that cannot be read
    /// as a record table at all is left untouched with a warning; reads
    /// will then degrade to an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] when the file cannot be created
    /// or the migrated table cannot be written back.
    pub fn initialize(&self) -> Result<(), LedgerError> {
        if !self.path.exists() {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&self.path)
                .map_err(write_error)?;
            writer.write_record(EXPECTED_HEADER).map_err(write_error)?;
            writer.flush()?;
            tracing::info!(path = %self.path.display(), "created backing file");
            return Ok(());
        }

        match self.load_lenient() {
            Ok((_, false)) => Ok(()),
            Ok((records, true)) => {
                self.rewrite_all(&records)?;
                tracing::info!(
                    path = %self.path.display(),
                    rows = records.len(),
                    "migrated backing file to canonical shape"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "backing file unreadable; leaving as-is"
                );
                Ok(())
            }
        }
    }

    /// Reads the full table in file order.
    ///
    /// A missing file is an empty table, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MalformedFile`] or
    /// [`LedgerError::InvalidDate`] when the content cannot be read as a
    /// record table. Callers degrade to an empty table on these.
    pub fn load_all(&self) -> Result<Vec<LodgeRecord>, LedgerError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for result in reader.deserialize::<CsvRow>() {
            let row = result?;
            records.push(row.into_record()?);
        }
        Ok(records)
    }

    /// Appends one record to the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on I/O failure.
    pub fn append(&self, record: &LodgeRecord) -> Result<(), LedgerError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(EXPECTED_HEADER).map_err(write_error)?;
        }
        writer
            .serialize(CsvRow::from_record(record))
            .map_err(write_error)?;
        writer.flush()?;
        Ok(())
    }

    /// Replaces the entire backing file with the given table, preserving
    /// slice order as row order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on I/O failure.
    pub fn rewrite_all(&self, records: &[LodgeRecord]) -> Result<(), LedgerError> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp)
                .map_err(write_error)?;
            writer.write_record(EXPECTED_HEADER).map_err(write_error)?;
            for record in records {
                writer
                    .serialize(CsvRow::from_record(record))
                    .map_err(write_error)?;
            }
            writer.flush()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Reads the table accepting every known legacy shape.
    ///
    /// Returns the records plus a dirty flag: `true` when anything
    /// differed from the canonical form (header, missing ids, display
    /// dates) and the file should be rewritten.
    fn load_lenient(&self) -> Result<(Vec<LodgeRecord>, bool), LedgerError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        let mut dirty = !headers.iter().eq(EXPECTED_HEADER);

        let column = |name: &str| headers.iter().position(|h| h == name);
        let missing = |name: &str| LedgerError::MalformedFile(format!("missing column: {name}"));
        let id_col = column("Id");
        let name_col = column("Name").ok_or_else(|| missing("Name"))?;
        let occupation_col = column("Occupation").ok_or_else(|| missing("Occupation"))?;
        let lodge_col = column("Lodge Date").ok_or_else(|| missing("Lodge Date"))?;
        let grant_col = column("Grant Date");
        let comments_col = column("Comments").ok_or_else(|| missing("Comments"))?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let field =
                |col: Option<usize>| col.and_then(|i| row.get(i)).unwrap_or("").trim().to_string();

            let raw_id = field(id_col);
            let id = if let Ok(id) = raw_id.parse::<RecordId>() {
                id
            } else {
                dirty = true;
                RecordId::new()
            };

            let raw_lodge = field(Some(lodge_col));
            let lodge_date = dates::parse_stored(&raw_lodge)?;
            if raw_lodge != dates::format_storage(lodge_date) {
                dirty = true;
            }

            let raw_grant = field(grant_col);
            let grant_date = dates::parse_stored_optional(&raw_grant)?;
            let canonical_grant = grant_date.map(dates::format_storage).unwrap_or_default();
            if raw_grant != canonical_grant {
                dirty = true;
            }

            records.push(LodgeRecord {
                id,
                name: field(Some(name_col)),
                occupation: field(Some(occupation_col)),
                lodge_date,
                grant_date,
                comments: field(Some(comments_col)),
            });
        }

        Ok((records, dirty))
    }
}

/// Maps a CSV-layer error on a write path into a storage error.
fn write_error(err: csv::Error) -> LedgerError {
    LedgerError::Storage(err.to_string())
}
