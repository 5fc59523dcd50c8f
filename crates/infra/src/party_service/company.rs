use synloan_core::{AggregateRoot, Clock, Criteria};
use synloan_parties::{
    Borrower, BorrowerCriterion, Company, CompanyCriterion, CompanyDetails, CompanyId, Industry, Investor,
    InvestorCriterion,
};

use super::{name_filter, warn_rejected, PartyResult, PartyService, PartyServiceError};
use super::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::config::ReferencePolicy;
use crate::store::{Page, PageRequest, Pagination, RecordStore};

impl<CS, BS, IS> PartyService<CS, BS, IS>
where
    CS: RecordStore<Company, CompanyCriterion>,
    BS: RecordStore<Borrower, BorrowerCriterion>,
    IS: RecordStore<Investor, InvestorCriterion>,
{
    pub fn create_company(&self, request: CreateCompanyRequest) -> PartyResult<Company> {
        let company = Company::new(CompanyDetails::from(request), self.clock.now())?;
        let saved = self.companies.save(company)?;
        tracing::info!(company_id = ?saved.id(), "company created");
        Ok(saved)
    }

    pub fn get_company(&self, id: CompanyId) -> PartyResult<Company> {
        self.companies
            .find_by_id(id)?
            .ok_or_else(|| PartyServiceError::not_found("Company", id))
    }

    pub fn list_companies(&self, page: PageRequest) -> PartyResult<Page<Company>> {
        Ok(self
            .companies
            .find_all(&Criteria::all(), self.config.normalize(page))?)
    }

    /// Replace a company's fields, guarded by the caller's `version`.
    pub fn update_company(&self, id: CompanyId, request: UpdateCompanyRequest) -> PartyResult<Company> {
        let existing = self.get_company(id)?;
        let version = request.version;
        let replacement = Company::replacement(id, version, request.into(), existing.created_at())?;

        let saved = self
            .companies
            .save(replacement)
            .map_err(PartyServiceError::from)
            .inspect_err(|e| warn_rejected("update_company", e))?;
        tracing::info!(company_id = %id, version = saved.version(), "company updated");
        Ok(saved)
    }

    /// Delete a company. No version check.
    ///
    /// Under `ReferencePolicy::Restrict` the delete is refused while any
    /// borrower or investor still references the company.
    pub fn delete_company(&self, id: CompanyId) -> PartyResult<()> {
        if !self.companies.exists_by_id(id)? {
            return Err(PartyServiceError::not_found("Company", id));
        }

        if self.config.company_delete_policy == ReferencePolicy::Restrict {
            self.ensure_unreferenced(id)
                .inspect_err(|e| warn_rejected("delete_company", e))?;
        }

        self.companies.delete_by_id(id)?;
        tracing::info!(company_id = %id, "company deleted");
        Ok(())
    }

    pub fn search_companies(
        &self,
        name: Option<&str>,
        industry: Option<Industry>,
        page: PageRequest,
    ) -> PartyResult<Page<Company>> {
        let criteria = Criteria::all()
            .and_maybe(name_filter(name).map(CompanyCriterion::name_contains))
            .and_maybe(industry.map(CompanyCriterion::Industry));
        let pagination = self.config.normalize(page);
        tracing::debug!(?criteria, ?pagination, "searching companies");
        Ok(self.companies.find_all(&criteria, pagination)?)
    }

    fn ensure_unreferenced(&self, id: CompanyId) -> PartyResult<()> {
        let probe = Pagination { limit: 1, offset: 0 };
        let borrowers = self
            .borrowers
            .find_all(&Criteria::all().and(BorrowerCriterion::Company(id)), probe)?
            .total;
        let investors = self
            .investors
            .find_all(&Criteria::all().and(InvestorCriterion::Company(id)), probe)?
            .total;

        if borrowers > 0 || investors > 0 {
            return Err(PartyServiceError::BusinessRuleViolation(format!(
                "Company {id} is still referenced (borrowers: {borrowers}, investors: {investors})"
            )));
        }
        Ok(())
    }
}
