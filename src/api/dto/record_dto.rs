//! Record DTOs for submit, get, update, and list operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::dates;
use crate::domain::{LodgeRecord, RecordDraft, RecordId};

/// Request body for `POST /records` and `PUT /records/{id}`.
///
/// Mirrors the original entry form: nothing is mandatory, a missing
/// lodge date defaults to the current date on create.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordRequest {
    /// Member name. Free text.
    #[serde(default)]
    pub name: String,
    /// Occupation. Free text.
    #[serde(default)]
    pub occupation: String,
    /// Filing date, ISO `YYYY-MM-DD`. Defaults to today when omitted.
    #[serde(default)]
    pub lodge_date: Option<NaiveDate>,
    /// Approval date, ISO `YYYY-MM-DD`. Absent until granted.
    #[serde(default)]
    pub grant_date: Option<NaiveDate>,
    /// Free-text comments, may span multiple lines.
    #[serde(default)]
    pub comments: String,
}

impl From<RecordRequest> for RecordDraft {
    fn from(req: RecordRequest) -> Self {
        Self {
            name: req.name,
            occupation: req.occupation,
            lodge_date: req.lodge_date,
            grant_date: req.grant_date,
            comments: req.comments,
        }
    }
}

/// A single record with display-formatted dates.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordResponse {
    /// Stable record identifier.
    #[schema(value_type = uuid::Uuid)]
    pub id: RecordId,
    /// Member name.
    pub name: String,
    /// Occupation.
    pub occupation: String,
    /// Filing date rendered for display, e.g. `"12 July, 2024"`.
    pub lodge_date: String,
    /// Approval date rendered for display, `"None"` when absent.
    pub grant_date: String,
    /// Free-text comments.
    pub comments: String,
}

impl From<&LodgeRecord> for RecordResponse {
    fn from(record: &LodgeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            occupation: record.occupation.clone(),
            lodge_date: dates::format_display(record.lodge_date),
            grant_date: dates::format_grant_display(record.grant_date),
            comments: record.comments.clone(),
        }
    }
}

/// Full-table response for `GET /records`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TableResponse {
    /// Records in append order.
    pub data: Vec<RecordResponse>,
    /// Number of records.
    pub total: usize,
    /// Set when the backing file could not be read and the table
    /// degraded to empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn response_formats_dates_for_display() {
        let record = LodgeRecord {
            id: RecordId::new(),
            name: "A. Smith".to_string(),
            occupation: "Clerk".to_string(),
            lodge_date: NaiveDate::from_ymd_opt(2024, 7, 12).unwrap_or_default(),
            grant_date: None,
            comments: "urgent".to_string(),
        };
        let response = RecordResponse::from(&record);
        assert_eq!(response.lodge_date, "12 July, 2024");
        assert_eq!(response.grant_date, "None");
    }

    #[test]
    fn request_accepts_sparse_payload() {
        let parsed: Result<RecordRequest, _> = serde_json::from_str(r#"{"name":"A. Smith"}"#);
        let Ok(request) = parsed else {
            panic!("sparse payload should deserialize");
        };
        assert_eq!(request.name, "A. Smith");
        assert!(request.lodge_date.is_none());
        assert!(request.comments.is_empty());
    }

    #[test]
    fn request_parses_iso_dates() {
        let parsed: Result<RecordRequest, _> =
            serde_json::from_str(r#"{"name":"A","lodge_date":"2024-07-12"}"#);
        let Ok(request) = parsed else {
            panic!("payload should deserialize");
        };
        assert_eq!(request.lodge_date, NaiveDate::from_ymd_opt(2024, 7, 12));
    }

    #[test]
    fn warning_is_omitted_when_none() {
        let response = TableResponse {
            data: Vec::new(),
            total: 0,
            warning: None,
        };
        let json = serde_json::to_value(&response).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.get("warning").is_none());
    }
}
