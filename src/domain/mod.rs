//! Domain layer: core types, record cache, and event system.
//!
//! This module contains the server-side domain model including record
//! identity, the lodge record itself, the date formatting rules shared
//! by storage and display, the event bus for broadcasting table changes,
//! and the read-through cache over the backing file.

pub mod cache;
pub mod dates;
pub mod event_bus;
pub mod record;
pub mod record_event;
pub mod record_id;

pub use cache::LedgerCache;
pub use event_bus::EventBus;
pub use record::{LodgeRecord, RecordDraft};
pub use record_event::{EventKind, LedgerEvent};
pub use record_id::RecordId;
