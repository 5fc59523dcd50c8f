use synloan_core::{AggregateRoot, Clock, Criteria, Money};
use synloan_parties::{
    Borrower, BorrowerCriterion, Company, CompanyCriterion, Investor, InvestorCriterion, InvestorDetails, InvestorId,
    InvestorType,
};

use super::{name_filter, warn_rejected, PartyResult, PartyService, PartyServiceError};
use super::{CreateInvestorRequest, UpdateInvestorRequest};
use crate::store::{Page, PageRequest, RecordStore};

impl<CS, BS, IS> PartyService<CS, BS, IS>
where
    CS: RecordStore<Company, CompanyCriterion>,
    BS: RecordStore<Borrower, BorrowerCriterion>,
    IS: RecordStore<Investor, InvestorCriterion>,
{
    pub fn create_investor(&self, request: CreateInvestorRequest) -> PartyResult<Investor> {
        let company_id = self.resolve_company_reference(request.company_id.as_deref())?;
        let details = InvestorDetails {
            name: request.name,
            email: request.email,
            phone_number: request.phone_number,
            company_id,
            investment_capacity: request.investment_capacity,
            investor_type: request.investor_type,
        };

        let saved = self.investors.save(Investor::new(details, self.clock.now())?)?;
        tracing::info!(investor_id = ?saved.id(), "investor created");
        Ok(saved)
    }

    pub fn get_investor(&self, id: InvestorId) -> PartyResult<Investor> {
        self.investors
            .find_by_id(id)?
            .ok_or_else(|| PartyServiceError::not_found("Investor", id))
    }

    pub fn list_investors(&self, page: PageRequest) -> PartyResult<Page<Investor>> {
        Ok(self
            .investors
            .find_all(&Criteria::all(), self.config.normalize(page))?)
    }

    pub fn list_active_investors(&self, page: PageRequest) -> PartyResult<Page<Investor>> {
        let criteria = Criteria::all().and(InvestorCriterion::Active(true));
        Ok(self
            .investors
            .find_all(&criteria, self.config.normalize(page))?)
    }

    /// Replace an investor's descriptive fields, guarded by the caller's `version`.
    ///
    /// The invested amount is kept from the stored record, as is the active
    /// flag unless the request sets it.
    pub fn update_investor(&self, id: InvestorId, request: UpdateInvestorRequest) -> PartyResult<Investor> {
        let existing = self.get_investor(id)?;
        let company_id = self.resolve_company_reference(request.company_id.as_deref())?;
        let details = InvestorDetails {
            name: request.name,
            email: request.email,
            phone_number: request.phone_number,
            company_id,
            investment_capacity: request.investment_capacity,
            investor_type: request.investor_type,
        };

        let replacement = Investor::replacement(&existing, request.version, details, request.is_active)?;
        let saved = self
            .investors
            .save(replacement)
            .map_err(PartyServiceError::from)
            .inspect_err(|e| warn_rejected("update_investor", e))?;
        tracing::info!(investor_id = %id, version = saved.version(), "investor updated");
        Ok(saved)
    }

    pub fn delete_investor(&self, id: InvestorId) -> PartyResult<()> {
        if !self.investors.exists_by_id(id)? {
            return Err(PartyServiceError::not_found("Investor", id));
        }
        self.investors.delete_by_id(id)?;
        tracing::info!(investor_id = %id, "investor deleted");
        Ok(())
    }

    pub fn search_investors(
        &self,
        name: Option<&str>,
        investor_type: Option<InvestorType>,
        page: PageRequest,
    ) -> PartyResult<Page<Investor>> {
        let criteria = Criteria::all()
            .and_maybe(name_filter(name).map(InvestorCriterion::name_contains))
            .and_maybe(investor_type.map(InvestorCriterion::InvestorType));
        let pagination = self.config.normalize(page);
        tracing::debug!(?criteria, ?pagination, "searching investors");
        Ok(self.investors.find_all(&criteria, pagination)?)
    }

    /// Add `amount` to the investor's current investment.
    ///
    /// Absent or negative amounts leave the amount unchanged, but the record
    /// is still written (and its version bumped) so callers see one outcome
    /// per call.
    pub fn increase_investment_amount(
        &self,
        id: InvestorId,
        version: u64,
        amount: Option<Money>,
    ) -> PartyResult<Investor> {
        self.adjust_investment(id, version, "increase_investment_amount", |investor, at| {
            investor.increase_investment_amount(amount, at)
        })
    }

    /// Subtract `amount` from the investor's current investment. No floor at zero.
    pub fn decrease_investment_amount(
        &self,
        id: InvestorId,
        version: u64,
        amount: Option<Money>,
    ) -> PartyResult<Investor> {
        self.adjust_investment(id, version, "decrease_investment_amount", |investor, at| {
            investor.decrease_investment_amount(amount, at)
        })
    }

    fn adjust_investment<F>(&self, id: InvestorId, version: u64, operation: &str, apply: F) -> PartyResult<Investor>
    where
        F: FnOnce(&mut Investor, chrono::DateTime<chrono::Utc>),
    {
        let mut investor = self.get_investor(id)?;
        apply(&mut investor, self.clock.now());
        investor.expect_version(version);

        let saved = self
            .investors
            .save(investor)
            .map_err(PartyServiceError::from)
            .inspect_err(|e| warn_rejected(operation, e))?;
        tracing::info!(
            investor_id = %id,
            operation,
            amount = %saved.current_investment_amount(),
            version = saved.version(),
            "investment amount adjusted"
        );
        Ok(saved)
    }
}
