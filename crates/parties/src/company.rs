use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use synloan_core::{AggregateRoot, Criterion, DomainError, DomainResult, Persistable};

use crate::classification::Industry;
use crate::ids::CompanyId;

/// Caller-supplied company attributes (everything except identity and audit fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub company_name: String,
    pub registration_number: Option<String>,
    pub industry: Option<Industry>,
    pub address: Option<String>,
    pub country: Option<String>,
}

impl CompanyDetails {
    fn validate(&self) -> DomainResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(DomainError::validation("company name cannot be empty"));
        }
        Ok(())
    }
}

/// Aggregate root: a legal entity that borrowers and investors may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: Option<CompanyId>,
    #[serde(flatten)]
    details: CompanyDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

impl Company {
    /// New, not-yet-persisted company. Both audit timestamps are `now`.
    pub fn new(details: CompanyDetails, now: DateTime<Utc>) -> DomainResult<Self> {
        details.validate()?;
        Ok(Self {
            id: None,
            details,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Full replacement of an existing company for an optimistic update.
    ///
    /// Carries the caller's expected `version` and the original `created_at`;
    /// storage compares the version and stamps `updated_at` on write.
    pub fn replacement(
        id: CompanyId,
        expected_version: u64,
        details: CompanyDetails,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        details.validate()?;
        Ok(Self {
            id: Some(id),
            details,
            created_at,
            updated_at: created_at,
            version: expected_version,
        })
    }

    pub fn company_name(&self) -> &str {
        &self.details.company_name
    }

    pub fn registration_number(&self) -> Option<&str> {
        self.details.registration_number.as_deref()
    }

    pub fn industry(&self) -> Option<Industry> {
        self.details.industry
    }

    pub fn address(&self) -> Option<&str> {
        self.details.address.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.details.country.as_deref()
    }

    pub fn details(&self) -> &CompanyDetails {
        &self.details
    }
}

impl AggregateRoot for Company {
    type Id = CompanyId;

    fn id(&self) -> Option<CompanyId> {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Persistable for Company {
    const KIND: &'static str = "Company";

    fn assign_id(&mut self, id: CompanyId) {
        self.id = Some(id);
    }

    fn record_write(&mut self, version: u64, at: DateTime<Utc>) {
        self.version = version;
        self.updated_at = at;
    }
}

/// Search predicates over companies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyCriterion {
    /// Case-insensitive substring of the company name.
    NameContains(String),
    Industry(Industry),
}

impl CompanyCriterion {
    pub fn name_contains(fragment: &str) -> Self {
        Self::NameContains(fragment.to_lowercase())
    }
}

impl Criterion<Company> for CompanyCriterion {
    fn matches(&self, candidate: &Company) -> bool {
        match self {
            CompanyCriterion::NameContains(fragment) => candidate
                .company_name()
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            CompanyCriterion::Industry(industry) => candidate.industry() == Some(*industry),
        }
    }
}
