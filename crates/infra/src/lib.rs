//! Infrastructure layer: record storage, configuration, and the party service façade.

pub mod config;
pub mod party_service;
pub mod store;


pub use config::{PartyConfig, ReferencePolicy};
pub use party_service::{InMemoryPartyService, PartyResult, PartyService, PartyServiceError};
pub use store::{InMemoryRecordStore, Page, PageRequest, Pagination, RecordStore, StoreError};
