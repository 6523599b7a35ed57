//! The ledger record and the submission draft it is created from.

use chrono::{NaiveDate, Utc};

use super::RecordId;

/// One row of the lodge ledger.
///
/// Records have no status field: every record is equally active until it
/// is deleted. Row order in the backing file is append order and `load`
/// preserves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodgeRecord {
    /// Stable identifier (immutable after creation).
    pub id: RecordId,

    /// Member name. Free text, no uniqueness constraint.
    pub name: String,

    /// Occupation. Free text.
    pub occupation: String,

    /// Date the application was filed.
    pub lodge_date: NaiveDate,

    /// Date the approval was issued; absent until granted.
    pub grant_date: Option<NaiveDate>,

    /// Free-text comments, may span multiple lines.
    pub comments: String,
}

/// Form submission payload: everything a [`LodgeRecord`] needs except
/// its identity.
#[derive(Debug, Clone)]
pub struct RecordDraft {
    /// Member name.
    pub name: String,
    /// Occupation.
    pub occupation: String,
    /// Filing date; defaults to the current date when omitted.
    pub lodge_date: Option<NaiveDate>,
    /// Approval date, if already issued.
    pub grant_date: Option<NaiveDate>,
    /// Free-text comments.
    pub comments: String,
}

impl LodgeRecord {
    /// Builds a record from a submission draft, assigning a fresh id and
    /// defaulting the lodge date to today when the form left it empty.
    #[must_use]
    pub fn from_draft(draft: RecordDraft) -> Self {
        Self {
            id: RecordId::new(),
            name: draft.name,
            occupation: draft.occupation,
            lodge_date: draft.lodge_date.unwrap_or_else(|| Utc::now().date_naive()),
            grant_date: draft.grant_date,
            comments: draft.comments,
        }
    }

    /// Applies a draft to an existing record in place, keeping its id.
    /// An omitted lodge date keeps the stored one rather than resetting
    /// to today.
    pub fn apply_draft(&mut self, draft: RecordDraft) {
        self.name = draft.name;
        self.occupation = draft.occupation;
        if let Some(lodge_date) = draft.lodge_date {
            self.lodge_date = lodge_date;
        }
        self.grant_date = draft.grant_date;
        self.comments = draft.comments;
    }
}
