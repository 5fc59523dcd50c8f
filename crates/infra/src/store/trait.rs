use std::sync::Arc;

use thiserror::Error;

use synloan_core::{Criteria, Persistable};

use super::query::{Page, Pagination};

/// Record store operation error.
///
/// These are **infrastructure errors** (concurrency, missing rows, backend
/// failures) as opposed to domain errors (validation, business rules).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The supplied version does not match the persisted one.
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    /// An update targeted a record that no longer exists.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The backend could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Versioned record storage for one aggregate type.
///
/// ## Save Semantics
///
/// `save()` is insert-or-compare-and-swap:
/// - a record without an id is **inserted**: storage assigns the next id and
///   version 0, keeping the record's audit timestamps
/// - a record with an id is an **update**: it succeeds only if the record's
///   version equals the persisted version, in which case the version becomes
///   `persisted + 1` and `updated_at` is stamped by the store's clock
///
/// The version compare and the write are atomic with respect to other `save`
/// calls on the same store, so of two writers holding the same version exactly
/// one wins and the other gets `StoreError::Concurrency`.
///
/// ## Query Semantics
///
/// `find_all()` returns records matching every term of `criteria` (an empty
/// conjunction matches all), ordered by id ascending, sliced by `pagination`.
pub trait RecordStore<R, C>: Send + Sync
where
    R: Persistable,
{
    fn find_by_id(&self, id: R::Id) -> Result<Option<R>, StoreError>;

    fn exists_by_id(&self, id: R::Id) -> Result<bool, StoreError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    fn save(&self, record: R) -> Result<R, StoreError>;

    /// Remove a record unconditionally. Returns whether anything was removed.
    fn delete_by_id(&self, id: R::Id) -> Result<bool, StoreError>;

    fn find_all(&self, criteria: &Criteria<C>, pagination: Pagination) -> Result<Page<R>, StoreError>;
}

impl<R, C, S> RecordStore<R, C> for Arc<S>
where
    R: Persistable,
    S: RecordStore<R, C> + ?Sized,
{
    fn find_by_id(&self, id: R::Id) -> Result<Option<R>, StoreError> {
        (**self).find_by_id(id)
    }

    fn exists_by_id(&self, id: R::Id) -> Result<bool, StoreError> {
        (**self).exists_by_id(id)
    }

    fn save(&self, record: R) -> Result<R, StoreError> {
        (**self).save(record)
    }

    fn delete_by_id(&self, id: R::Id) -> Result<bool, StoreError> {
        (**self).delete_by_id(id)
    }

    fn find_all(&self, criteria: &Criteria<C>, pagination: Pagination) -> Result<Page<R>, StoreError> {
        (**self).find_all(criteria, pagination)
    }
}
