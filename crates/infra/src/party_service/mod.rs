//! Party management façade.
//!
//! `PartyService` offers create/read/update/delete/search for companies,
//! borrowers and investors. Each call validates its input, applies the party
//! business rules, and delegates to a `RecordStore`:
//!
//! ```text
//! request
//!   ↓
//! 1. Load target (update/delete)            → ResourceNotFound
//!   ↓
//! 2. Business rules (credit limits)         → BusinessRuleViolation
//!   ↓
//! 3. Company reference check                → ResourceNotFound
//!   ↓
//! 4. Store save (compare-and-swap on version) → ConcurrencyConflict
//! ```
//!
//! The service keeps no mutable state of its own and never retries; a
//! `ConcurrencyConflict` tells the caller to reload and try again.

use std::sync::Arc;

use synloan_core::{Clock, SystemClock};
use synloan_parties::{
    Borrower, BorrowerCriterion, Company, CompanyCriterion, CompanyId, Investor, InvestorCriterion,
};

use crate::config::PartyConfig;
use crate::store::{InMemoryRecordStore, RecordStore};

mod borrower;
mod company;
pub mod error;
mod investor;
pub mod requests;

pub use error::{PartyResult, PartyServiceError};
pub use requests::{
    CreateBorrowerRequest, CreateCompanyRequest, CreateInvestorRequest, UpdateBorrowerRequest,
    UpdateCompanyRequest, UpdateInvestorRequest,
};

pub type InMemoryCompanyStore = InMemoryRecordStore<Company, CompanyCriterion>;
pub type InMemoryBorrowerStore = InMemoryRecordStore<Borrower, BorrowerCriterion>;
pub type InMemoryInvestorStore = InMemoryRecordStore<Investor, InvestorCriterion>;

/// Party service wired to in-memory stores (dev/test).
pub type InMemoryPartyService =
    PartyService<Arc<InMemoryCompanyStore>, Arc<InMemoryBorrowerStore>, Arc<InMemoryInvestorStore>>;

/// Stateless façade over the three party stores.
pub struct PartyService<CS, BS, IS> {
    companies: CS,
    borrowers: BS,
    investors: IS,
    clock: Arc<dyn Clock>,
    config: PartyConfig,
}

impl<CS, BS, IS> PartyService<CS, BS, IS>
where
    CS: RecordStore<Company, CompanyCriterion>,
    BS: RecordStore<Borrower, BorrowerCriterion>,
    IS: RecordStore<Investor, InvestorCriterion>,
{
    pub fn new(companies: CS, borrowers: BS, investors: IS, clock: Arc<dyn Clock>) -> Self {
        Self {
            companies,
            borrowers,
            investors,
            clock,
            config: PartyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PartyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PartyConfig {
        &self.config
    }

    /// Resolve an optional, string-encoded company reference.
    ///
    /// Blank or absent means no company. A malformed id or an id with no
    /// matching company is `ResourceNotFound`.
    fn resolve_company_reference(&self, raw: Option<&str>) -> PartyResult<Option<CompanyId>> {
        let Some(company_id) = CompanyId::parse_reference(raw)? else {
            return Ok(None);
        };
        if !self.companies.exists_by_id(company_id)? {
            return Err(PartyServiceError::not_found("Company", company_id));
        }
        Ok(Some(company_id))
    }
}

impl InMemoryPartyService {
    /// Build a service over fresh in-memory stores sharing `clock`.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(InMemoryCompanyStore::with_clock(clock.clone())),
            Arc::new(InMemoryBorrowerStore::with_clock(clock.clone())),
            Arc::new(InMemoryInvestorStore::with_clock(clock.clone())),
            clock,
        )
    }
}

impl Default for InMemoryPartyService {
    fn default() -> Self {
        Self::in_memory(Arc::new(SystemClock))
    }
}

/// Log requests turned away by a business rule or a stale version.
fn warn_rejected(operation: &str, err: &PartyServiceError) {
    if matches!(
        err,
        PartyServiceError::BusinessRuleViolation(_) | PartyServiceError::ConcurrencyConflict(_)
    ) {
        tracing::warn!(operation, error = %err, "party request rejected");
    }
}

/// Blank search text means "no name filter".
fn name_filter(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}
