//! Versioned record storage boundary.
//!
//! Defines the storage contract the party service depends on (lookup, existence
//! checks, insert-or-compare-and-swap save, delete, filtered paged queries) and
//! an in-memory implementation for tests and local runs.

pub mod in_memory;
pub mod query;
pub mod r#trait;

pub use in_memory::InMemoryRecordStore;
pub use query::{Page, PageRequest, Pagination};
pub use r#trait::{RecordStore, StoreError};
