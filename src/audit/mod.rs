//! Audit logging for famfin
//!
//! Every create, update and delete performed through the services is appended
//! to `audit.log` as one JSON line holding before/after snapshots.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
