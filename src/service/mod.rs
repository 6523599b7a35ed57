//! Service layer: business logic orchestration.
//!
//! [`LedgerService`] coordinates the backing file, the read-through
//! cache, and the [`crate::domain::EventBus`]. The HTML export renderer
//! lives alongside it.

pub mod html;
pub mod ledger_service;

pub use ledger_service::{LedgerService, LoadOutcome};
