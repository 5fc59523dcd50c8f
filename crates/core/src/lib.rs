//! `synloan-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod clock;
pub mod error;
pub mod id;
pub mod money;
pub mod query;
pub mod value_object;

pub use aggregate::{AggregateRoot, Persistable};
pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::FixedClock;
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use money::Money;
pub use query::{Criteria, Criterion};
pub use value_object::ValueObject;
