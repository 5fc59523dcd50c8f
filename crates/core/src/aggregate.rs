//! Aggregate root traits for versioned, storage-backed domain records.

use chrono::{DateTime, Utc};

use crate::id::RecordId;

/// Aggregate root marker + minimal interface.
///
/// Identity is assigned by storage on first write, so a freshly constructed
/// aggregate reports `None` until it has been persisted.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Copy
        + Eq
        + Ord
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display
        + From<RecordId>
        + Send
        + Sync;

    /// Returns the aggregate identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Optimistic-lock version of the aggregate's state.
    ///
    /// For persisted records this is the version storage last wrote. For a
    /// replacement record built from a caller request it is the version the
    /// caller *expects* to overwrite.
    fn version(&self) -> u64;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;
}

/// Write-boundary hooks.
///
/// Only storage adapters call these: identity assignment, version bumps and
/// audit stamping all happen in one place (the store's `save`), never in setters.
pub trait Persistable: AggregateRoot + Clone + Send + Sync {
    /// Short, stable name used in log fields and error messages (e.g. "Company").
    const KIND: &'static str;

    fn assign_id(&mut self, id: Self::Id);

    /// Record a successful write: the new version and the write timestamp.
    fn record_write(&mut self, version: u64, at: DateTime<Utc>);
}
