use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use synloan_core::{AggregateRoot, Criterion, DomainError, DomainResult, Money, Persistable};

use crate::ids::{BorrowerId, CompanyId};
use crate::rating::CreditRating;

/// Caller-supplied borrower attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowerDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub company_id: Option<CompanyId>,
    pub credit_limit: Option<Money>,
    pub credit_rating: Option<CreditRating>,
}

impl BorrowerDetails {
    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("borrower name cannot be empty"));
        }
        Ok(())
    }

    /// Credit-limit rule applied when a borrower is first registered.
    ///
    /// Unless `limit_override` is set, both rating and limit are required and the
    /// limit may not exceed the rating's ceiling.
    pub fn check_credit_limit_for_creation(&self, limit_override: bool) -> DomainResult<()> {
        if limit_override {
            return Ok(());
        }
        match (self.credit_rating, self.credit_limit) {
            (Some(rating), Some(limit)) if rating.is_limit_satisfied(limit) => Ok(()),
            (Some(rating), Some(limit)) => Err(DomainError::business_rule(format!(
                "creditLimit exceeds allowed maximum for creditRating {rating} (creditLimit: {limit}, max: {})",
                rating.max_limit()
            ))),
            (rating, limit) => Err(DomainError::business_rule(format!(
                "creditRating and creditLimit are both required without a credit limit override \
                 (creditRating: {}, creditLimit: {})",
                rating.map_or_else(|| "none".to_string(), |r| r.to_string()),
                limit.map_or_else(|| "none".to_string(), |l| l.to_string()),
            ))),
        }
    }

    /// Credit-limit rule applied on update: only checked when both fields are supplied.
    ///
    /// There is no override on this path.
    // TODO: confirm with product whether the creation override should also apply here.
    pub fn check_credit_limit_for_update(&self) -> DomainResult<()> {
        if let (Some(rating), Some(limit)) = (self.credit_rating, self.credit_limit) {
            if limit.is_greater_than(rating.max_limit()) {
                return Err(DomainError::business_rule(format!(
                    "Credit limit cannot exceed rating limit (creditLimit: {limit}, ratingLimit: {})",
                    rating.max_limit()
                )));
            }
        }
        Ok(())
    }
}

/// Aggregate root: a party drawing on a syndicated facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    id: Option<BorrowerId>,
    #[serde(flatten)]
    details: BorrowerDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

impl Borrower {
    pub fn new(details: BorrowerDetails, now: DateTime<Utc>) -> DomainResult<Self> {
        details.validate()?;
        Ok(Self {
            id: None,
            details,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Full replacement of an existing borrower for an optimistic update.
    pub fn replacement(
        id: BorrowerId,
        expected_version: u64,
        details: BorrowerDetails,
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

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn email(&self) -> Option<&str> {
        self.details.email.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.details.phone_number.as_deref()
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.details.company_id
    }

    pub fn credit_limit(&self) -> Option<Money> {
        self.details.credit_limit
    }

    pub fn credit_rating(&self) -> Option<CreditRating> {
        self.details.credit_rating
    }

    pub fn details(&self) -> &BorrowerDetails {
        &self.details
    }
}

impl AggregateRoot for Borrower {
    type Id = BorrowerId;

    fn id(&self) -> Option<BorrowerId> {
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

impl Persistable for Borrower {
    const KIND: &'static str = "Borrower";

    fn assign_id(&mut self, id: BorrowerId) {
        self.id = Some(id);
    }

    fn record_write(&mut self, version: u64, at: DateTime<Utc>) {
        self.version = version;
        self.updated_at = at;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowerCriterion {
    /// Case-insensitive substring of the borrower name.
    NameContains(String),
    CreditRating(CreditRating),
    Company(CompanyId),
}

impl BorrowerCriterion {
    pub fn name_contains(fragment: &str) -> Self {
        Self::NameContains(fragment.to_lowercase())
    }
}

impl Criterion<Borrower> for BorrowerCriterion {
    fn matches(&self, candidate: &Borrower) -> bool {
        match self {
            BorrowerCriterion::NameContains(fragment) => candidate
                .name()
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            BorrowerCriterion::CreditRating(rating) => candidate.credit_rating() == Some(*rating),
            BorrowerCriterion::Company(company_id) => candidate.company_id() == Some(*company_id),
        }
    }
}
