//! Storage-shaped row record mirroring the on-disk header.

use serde::{Deserialize, Serialize};

use crate::domain::dates;
use crate::domain::{LodgeRecord, RecordId};
use crate::error::LedgerError;

/// One CSV row exactly as written to the backing file.
///
/// Field order matches the canonical header
/// `Id,Name,Occupation,Lodge Date,Grant Date,Comments`. Dates are kept as
/// strings here; parsing into [`LodgeRecord`] happens in
/// [`CsvRow::into_record`] so a bad value surfaces as a typed error
/// instead of a deserializer panic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// Record identifier, UUID string.
    #[serde(rename = "Id")]
    pub id: String,
    /// Member name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Occupation.
    #[serde(rename = "Occupation")]
    pub occupation: String,
    /// Filing date, canonical ISO form.
    #[serde(rename = "Lodge Date")]
    pub lodge_date: String,
    /// Approval date, canonical ISO form or empty when absent.
    #[serde(rename = "Grant Date")]
    pub grant_date: String,
    /// Free-text comments.
    #[serde(rename = "Comments")]
    pub comments: String,
}

impl CsvRow {
    /// Serializes a domain record into its on-disk shape.
    #[must_use]
    pub fn from_record(record: &LodgeRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            occupation: record.occupation.clone(),
            lodge_date: dates::format_storage(record.lodge_date),
            grant_date: record
                .grant_date
                .map(dates::format_storage)
                .unwrap_or_default(),
            comments: record.comments.clone(),
        }
    }

    /// Parses this row back into a domain record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MalformedFile`] on an unparseable id and
    /// [`LedgerError::InvalidDate`] on an unparseable date value.
    pub fn into_record(self) -> Result<LodgeRecord, LedgerError> {
        let id: RecordId = self
            .id
            .parse()
            .map_err(|_| LedgerError::MalformedFile(format!("bad record id: {}", self.id)))?;
        Ok(LodgeRecord {
            id,
            name: self.name,
            occupation: self.occupation,
            lodge_date: dates::parse_stored(&self.lodge_date)?,
            grant_date: dates::parse_stored_optional(&self.grant_date)?,
            comments: self.comments,
        })
    }
}
