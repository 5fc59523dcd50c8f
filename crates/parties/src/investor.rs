use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use synloan_core::{AggregateRoot, Criterion, DomainError, DomainResult, Money, Persistable};

use crate::classification::InvestorType;
use crate::ids::{CompanyId, InvestorId};

/// Caller-supplied investor attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub company_id: Option<CompanyId>,
    /// Defaults to zero when absent.
    pub investment_capacity: Option<Decimal>,
    pub investor_type: Option<InvestorType>,
}

impl InvestorDetails {
    fn validate(&self) -> DomainResult<Decimal> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("investor name cannot be empty"));
        }
        let capacity = self.investment_capacity.unwrap_or(Decimal::ZERO);
        if capacity.is_sign_negative() && !capacity.is_zero() {
            return Err(DomainError::validation(format!(
                "investment capacity cannot be negative (got {capacity})"
            )));
        }
        Ok(capacity)
    }
}

/// Aggregate root: a lender participating in syndicated facilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investor {
    id: Option<InvestorId>,
    name: String,
    email: Option<String>,
    phone_number: Option<String>,
    company_id: Option<CompanyId>,
    investment_capacity: Decimal,
    current_investment_amount: Money,
    investor_type: Option<InvestorType>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

impl Investor {
    /// New, active investor with nothing invested yet.
    pub fn new(details: InvestorDetails, now: DateTime<Utc>) -> DomainResult<Self> {
        let capacity = details.validate()?;
        Ok(Self {
            id: None,
            name: details.name,
            email: details.email,
            phone_number: details.phone_number,
            company_id: details.company_id,
            investment_capacity: capacity,
            current_investment_amount: Money::zero(),
            investor_type: details.investor_type,
            is_active: true,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Full replacement of an existing investor for an optimistic update.
    ///
    /// The invested amount and active flag are not part of `details`; they are
    /// carried over from `current` unless `is_active` is given explicitly.
    pub fn replacement(
        current: &Investor,
        expected_version: u64,
        details: InvestorDetails,
        is_active: Option<bool>,
    ) -> DomainResult<Self> {
        let capacity = details.validate()?;
        Ok(Self {
            id: current.id,
            name: details.name,
            email: details.email,
            phone_number: details.phone_number,
            company_id: details.company_id,
            investment_capacity: capacity,
            current_investment_amount: current.current_investment_amount,
            investor_type: details.investor_type,
            is_active: is_active.unwrap_or(current.is_active),
            created_at: current.created_at,
            updated_at: current.updated_at,
            version: expected_version,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    pub fn investment_capacity(&self) -> Decimal {
        self.investment_capacity
    }

    pub fn current_investment_amount(&self) -> Money {
        self.current_investment_amount
    }

    pub fn investor_type(&self) -> Option<InvestorType> {
        self.investor_type
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Add to the invested amount.
    ///
    /// Absent or negative amounts are ignored. No capacity ceiling is enforced here.
    pub fn increase_investment_amount(&mut self, amount: Option<Money>, at: DateTime<Utc>) {
        if let Some(amount) = amount.filter(Money::is_positive_or_zero) {
            self.current_investment_amount = self.current_investment_amount.add(amount);
            self.updated_at = at;
        }
    }

    /// Subtract from the invested amount.
    ///
    /// Absent or negative amounts are ignored. The result may go below zero.
    pub fn decrease_investment_amount(&mut self, amount: Option<Money>, at: DateTime<Utc>) {
        if let Some(amount) = amount.filter(Money::is_positive_or_zero) {
            self.current_investment_amount = self.current_investment_amount.subtract(amount);
            self.updated_at = at;
        }
    }

    /// Re-target this record at the version the caller expects to overwrite.
    pub fn expect_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl AggregateRoot for Investor {
    type Id = InvestorId;

    fn id(&self) -> Option<InvestorId> {
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

impl Persistable for Investor {
    const KIND: &'static str = "Investor";

    fn assign_id(&mut self, id: InvestorId) {
        self.id = Some(id);
    }

    fn record_write(&mut self, version: u64, at: DateTime<Utc>) {
        self.version = version;
        self.updated_at = at;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvestorCriterion {
    /// Case-insensitive substring of the investor name.
    NameContains(String),
    InvestorType(InvestorType),
    Active(bool),
    Company(CompanyId),
}

impl InvestorCriterion {
    pub fn name_contains(fragment: &str) -> Self {
        Self::NameContains(fragment.to_lowercase())
    }
}

impl Criterion<Investor> for InvestorCriterion {
    fn matches(&self, candidate: &Investor) -> bool {
        match self {
            InvestorCriterion::NameContains(fragment) => candidate
                .name()
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            InvestorCriterion::InvestorType(t) => candidate.investor_type() == Some(*t),
            InvestorCriterion::Active(active) => candidate.is_active() == *active,
            InvestorCriterion::Company(company_id) => candidate.company_id() == Some(*company_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn details() -> InvestorDetails {
        InvestorDetails {
            name: "Northwind Pension".to_string(),
            email: None,
            phone_number: Some("+81 3 0000 0000".to_string()),
            company_id: None,
            investment_capacity: None,
            investor_type: Some(InvestorType::PensionFund),
        }
    }

    #[test]
    fn defaults_capacity_amount_and_active_flag() {
        let inv = Investor::new(details(), t0()).unwrap();
        assert_eq!(inv.investment_capacity(), Decimal::ZERO);
        assert_eq!(inv.current_investment_amount(), Money::zero());
        assert!(inv.is_active());
        assert_eq!(inv.created_at(), inv.updated_at());
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let mut d = details();
        d.investment_capacity = Some(Decimal::from(-1));
        assert!(matches!(Investor::new(d, t0()), Err(DomainError::Validation(_))));
    }

    #[test]
    fn increase_and_decrease_adjust_amount_and_restamp() {
        let mut inv = Investor::new(details(), t0()).unwrap();
        let t1 = t0() + chrono::Duration::hours(1);
        inv.increase_investment_amount(Some(Money::from(300)), t1);
        assert_eq!(inv.current_investment_amount(), Money::from(300));
        assert_eq!(inv.updated_at(), t1);

        let t2 = t1 + chrono::Duration::hours(1);
        inv.decrease_investment_amount(Some(Money::from(500)), t2);
        assert_eq!(inv.current_investment_amount(), Money::from(-200));
        assert_eq!(inv.updated_at(), t2);
    }

    #[test]
    fn absent_amount_is_a_no_op() {
        let mut inv = Investor::new(details(), t0()).unwrap();
        inv.increase_investment_amount(None, t0() + chrono::Duration::days(1));
        inv.decrease_investment_amount(None, t0() + chrono::Duration::days(1));
        assert_eq!(inv.current_investment_amount(), Money::zero());
        assert_eq!(inv.updated_at(), t0());
    }

    #[test]
    fn replacement_preserves_amount_creation_time_and_active_flag() {
        let mut inv = Investor::new(details(), t0()).unwrap();
        inv.assign_id(InvestorId::new(1));
        inv.increase_investment_amount(Some(Money::from(10)), t0());

        let mut d = details();
        d.name = "Northwind Pension II".to_string();
        let r = Investor::replacement(&inv, 4, d, None).unwrap();
        assert_eq!(r.id(), Some(InvestorId::new(1)));
        assert_eq!(r.version(), 4);
        assert_eq!(r.current_investment_amount(), Money::from(10));
        assert!(r.is_active());
        assert_eq!(r.created_at(), t0());

        let r = Investor::replacement(&inv, 4, details(), Some(false)).unwrap();
        assert!(!r.is_active());
        assert!(InvestorCriterion::Active(false).matches(&r));
    }

    proptest! {
        #[test]
        fn negative_deltas_never_change_the_amount(start in 0i64..1_000_000, delta in -1_000_000i64..0) {
            let mut inv = Investor::new(details(), t0()).unwrap();
            inv.increase_investment_amount(Some(Money::from(start)), t0());
            let before = inv.current_investment_amount();

            inv.increase_investment_amount(Some(Money::from(delta)), t0() + chrono::Duration::days(1));
            inv.decrease_investment_amount(Some(Money::from(delta)), t0() + chrono::Duration::days(1));

            prop_assert_eq!(inv.current_investment_amount(), before);
            prop_assert_eq!(inv.updated_at(), t0());
        }
    }
}
