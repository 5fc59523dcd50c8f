use thiserror::Error;

use synloan_core::DomainError;

use crate::store::StoreError;

pub type PartyResult<T> = Result<T, PartyServiceError>;

/// Failure surfaced by `PartyService`.
///
/// Mapping to transport status codes is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartyServiceError {
    /// The target record, or a referenced company, does not exist (or the
    /// reference is not a valid id).
    #[error("{0}")]
    ResourceNotFound(String),

    /// A domain rule rejected the request.
    #[error("{0}")]
    BusinessRuleViolation(String),

    /// The caller's version is stale; reload and retry.
    #[error("{0}")]
    ConcurrencyConflict(String),

    /// A field value is malformed.
    #[error("{0}")]
    Validation(String),

    /// Storage failed for reasons unrelated to the request.
    #[error(transparent)]
    Store(StoreError),
}

impl PartyServiceError {
    pub fn not_found(kind: &str, id: impl core::fmt::Display) -> Self {
        Self::ResourceNotFound(format!("{kind} not found with ID: {id}"))
    }
}

impl From<StoreError> for PartyServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Concurrency(msg) => PartyServiceError::ConcurrencyConflict(msg),
            StoreError::NotFound(msg) => PartyServiceError::ResourceNotFound(msg),
            other => PartyServiceError::Store(other),
        }
    }
}

impl From<DomainError> for PartyServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => PartyServiceError::Validation(msg),
            DomainError::BusinessRule(msg) => PartyServiceError::BusinessRuleViolation(msg),
            DomainError::InvalidId(msg) => PartyServiceError::ResourceNotFound(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_conflicts_stay_distinct_from_validation() {
        let e: PartyServiceError = StoreError::Concurrency("stale".into()).into();
        assert_eq!(e, PartyServiceError::ConcurrencyConflict("stale".into()));

        let e: PartyServiceError = StoreError::Unavailable("down".into()).into();
        assert!(matches!(e, PartyServiceError::Store(_)));
    }

    #[test]
    fn invalid_ids_surface_as_not_found() {
        let e: PartyServiceError = DomainError::invalid_id("Invalid company ID: x").into();
        assert_eq!(e.to_string(), "Invalid company ID: x");
        assert!(matches!(e, PartyServiceError::ResourceNotFound(_)));
    }
}
