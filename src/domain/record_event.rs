//! Domain events reflecting table mutations.
//!
//! Every write to the ledger emits a [`LedgerEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers so
//! an open table view can refresh without polling.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RecordId;

/// Kind of table change, used for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A record was appended to the table.
    RecordAdded,
    /// A record was replaced in place.
    RecordUpdated,
    /// A record was removed from the table.
    RecordDeleted,
}

impl EventKind {
    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RecordAdded => "record_added",
            Self::RecordUpdated => "record_updated",
            Self::RecordDeleted => "record_deleted",
        }
    }

    /// Parses a wire name back into a kind.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "record_added" => Some(Self::RecordAdded),
            "record_updated" => Some(Self::RecordUpdated),
            "record_deleted" => Some(Self::RecordDeleted),
            _ => None,
        }
    }
}

/// Domain event emitted after every table mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Emitted when a record is appended.
    RecordAdded {
        /// Record identifier.
        id: RecordId,
        /// Member name, echoed for display without a refetch.
        name: String,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a record is replaced in place.
    RecordUpdated {
        /// Record identifier.
        id: RecordId,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a record is removed.
    RecordDeleted {
        /// Record identifier.
        id: RecordId,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Returns the record this event concerns.
    #[must_use]
    pub const fn record_id(&self) -> RecordId {
        match self {
            Self::RecordAdded { id, .. }
            | Self::RecordUpdated { id, .. }
            | Self::RecordDeleted { id, .. } => *id,
        }
    }

    /// Returns the change kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::RecordAdded { .. } => EventKind::RecordAdded,
            Self::RecordUpdated { .. } => EventKind::RecordUpdated,
            Self::RecordDeleted { .. } => EventKind::RecordDeleted,
        }
    }
}
