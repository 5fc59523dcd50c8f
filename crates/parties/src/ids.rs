//! Typed identifiers for each party aggregate.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use synloan_core::{DomainError, RecordId};

/// Company identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub RecordId);

/// Borrower identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowerId(pub RecordId);

/// Investor identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvestorId(pub RecordId);

macro_rules! impl_party_id {
    ($t:ident, $name:literal) => {
        impl $t {
            pub fn new(raw: u64) -> Self {
                Self(RecordId::from_raw(raw))
            }

            pub fn get(&self) -> u64 {
                self.0.get()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<RecordId> for $t {
            fn from(value: RecordId) -> Self {
                Self(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = RecordId::from_str(s)
                    .map_err(|_| DomainError::invalid_id(format!("Invalid {} ID: {s}", $name)))?;
                Ok(Self(id))
            }
        }
    };
}

impl_party_id!(CompanyId, "company");
impl_party_id!(BorrowerId, "borrower");
impl_party_id!(InvestorId, "investor");

impl CompanyId {
    /// Parse an optional, string-encoded company reference.
    ///
    /// Absent or blank input means "no company". Anything else must be a valid id.
    pub fn parse_reference(raw: Option<&str>) -> Result<Option<Self>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}
