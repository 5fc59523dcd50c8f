use synloan_core::{AggregateRoot, Clock, Criteria};
use synloan_parties::{
    Borrower, BorrowerCriterion, BorrowerDetails, BorrowerId, Company, CompanyCriterion, CreditRating, Investor,
    InvestorCriterion,
};

use super::{name_filter, warn_rejected, PartyResult, PartyService, PartyServiceError};
use super::{CreateBorrowerRequest, UpdateBorrowerRequest};
use crate::store::{Page, PageRequest, RecordStore};

impl<CS, BS, IS> PartyService<CS, BS, IS>
where
    CS: RecordStore<Company, CompanyCriterion>,
    BS: RecordStore<Borrower, BorrowerCriterion>,
    IS: RecordStore<Investor, InvestorCriterion>,
{
    /// Register a borrower.
    ///
    /// The company reference is checked first, then the credit-limit rule
    /// (skipped when `credit_limit_override` is set).
    pub fn create_borrower(&self, request: CreateBorrowerRequest) -> PartyResult<Borrower> {
        let company_id = self.resolve_company_reference(request.company_id.as_deref())?;
        let details = BorrowerDetails {
            name: request.name,
            email: request.email,
            phone_number: request.phone_number,
            company_id,
            credit_limit: request.credit_limit,
            credit_rating: request.credit_rating,
        };
        details
            .check_credit_limit_for_creation(request.credit_limit_override)
            .map_err(PartyServiceError::from)
            .inspect_err(|e| warn_rejected("create_borrower", e))?;

        let saved = self.borrowers.save(Borrower::new(details, self.clock.now())?)?;
        tracing::info!(
            borrower_id = ?saved.id(),
            override_applied = request.credit_limit_override,
            "borrower created"
        );
        Ok(saved)
    }

    pub fn get_borrower(&self, id: BorrowerId) -> PartyResult<Borrower> {
        self.borrowers
            .find_by_id(id)?
            .ok_or_else(|| PartyServiceError::not_found("Borrower", id))
    }

    pub fn list_borrowers(&self, page: PageRequest) -> PartyResult<Page<Borrower>> {
        Ok(self
            .borrowers
            .find_all(&Criteria::all(), self.config.normalize(page))?)
    }

    /// Replace a borrower's fields, guarded by the caller's `version`.
    ///
    /// Order of checks: borrower exists, credit-limit rule, company reference.
    pub fn update_borrower(&self, id: BorrowerId, request: UpdateBorrowerRequest) -> PartyResult<Borrower> {
        let existing = self.get_borrower(id)?;

        let mut details = BorrowerDetails {
            name: request.name,
            email: request.email,
            phone_number: request.phone_number,
            company_id: None,
            credit_limit: request.credit_limit,
            credit_rating: request.credit_rating,
        };
        details
            .check_credit_limit_for_update()
            .map_err(PartyServiceError::from)
            .inspect_err(|e| warn_rejected("update_borrower", e))?;
        details.company_id = self.resolve_company_reference(request.company_id.as_deref())?;

        let replacement = Borrower::replacement(id, request.version, details, existing.created_at())?;
        let saved = self
            .borrowers
            .save(replacement)
            .map_err(PartyServiceError::from)
            .inspect_err(|e| warn_rejected("update_borrower", e))?;
        tracing::info!(borrower_id = %id, version = saved.version(), "borrower updated");
        Ok(saved)
    }

    pub fn delete_borrower(&self, id: BorrowerId) -> PartyResult<()> {
        if !self.borrowers.exists_by_id(id)? {
            return Err(PartyServiceError::not_found("Borrower", id));
        }
        self.borrowers.delete_by_id(id)?;
        tracing::info!(borrower_id = %id, "borrower deleted");
        Ok(())
    }

    pub fn search_borrowers(
        &self,
        name: Option<&str>,
        credit_rating: Option<CreditRating>,
        page: PageRequest,
    ) -> PartyResult<Page<Borrower>> {
        let criteria = Criteria::all()
            .and_maybe(name_filter(name).map(BorrowerCriterion::name_contains))
            .and_maybe(credit_rating.map(BorrowerCriterion::CreditRating));
        let pagination = self.config.normalize(page);
        tracing::debug!(?criteria, ?pagination, "searching borrowers");
        Ok(self.borrowers.find_all(&criteria, pagination)?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{company_request, service, test_clock};
    use super::*;
    use synloan_core::Money;

    fn create_request(rating: Option<CreditRating>, limit: Option<i64>) -> CreateBorrowerRequest {
        CreateBorrowerRequest {
            name: "Kaito Trading".to_string(),
            email: Some("treasury@kaito.example".to_string()),
            phone_number: None,
            company_id: None,
            credit_limit: limit.map(Money::from),
            credit_rating: rating,
            credit_limit_override: false,
        }
    }

    fn update_request(rating: Option<CreditRating>, limit: Option<i64>, version: u64) -> UpdateBorrowerRequest {
        UpdateBorrowerRequest {
            name: "Kaito Trading KK".to_string(),
            email: None,
            phone_number: Some("+81-3-0000-0000".to_string()),
            company_id: None,
            credit_limit: limit.map(Money::from),
            credit_rating: rating,
            version,
        }
    }

    #[test]
    fn create_within_ceiling_persists() {
        let clock = test_clock();
        let svc = service(&clock);
        let b = svc
            .create_borrower(create_request(Some(CreditRating::Bbb), Some(200_000)))
            .unwrap();
        assert_eq!(b.id(), Some(BorrowerId::new(1)));
        assert_eq!(b.version(), 0);
        assert_eq!(svc.get_borrower(BorrowerId::new(1)).unwrap(), b);
    }

    #[test]
    fn create_above_ceiling_is_rejected_unless_overridden() {
        let clock = test_clock();
        let svc = service(&clock);

        let err = svc
            .create_borrower(create_request(Some(CreditRating::Aa), Some(1_500_000)))
            .unwrap_err();
        assert!(matches!(err, PartyServiceError::BusinessRuleViolation(_)));
        assert!(svc.list_borrowers(PageRequest::default()).unwrap().is_empty());

        let mut overridden = create_request(Some(CreditRating::Aa), Some(1_500_000));
        overridden.credit_limit_override = true;
        let b = svc.create_borrower(overridden).unwrap();
        assert_eq!(b.credit_limit(), Some(Money::from(1_500_000)));
    }

    #[test]
    fn create_checks_company_before_credit_rule() {
        let clock = test_clock();
        let svc = service(&clock);
        let mut req = create_request(Some(CreditRating::D), Some(1));
        req.company_id = Some("77".to_string());

        let err = svc.create_borrower(req).unwrap_err();
        assert_eq!(
            err,
            PartyServiceError::ResourceNotFound("Company not found with ID: 77".to_string())
        );
    }

    #[test]
    fn create_links_existing_company() {
        let clock = test_clock();
        let svc = service(&clock);
        let company = svc.create_company(company_request("Acme")).unwrap().id().unwrap();
        let mut req = create_request(Some(CreditRating::A), Some(1_000));
        req.company_id = Some(company.to_string());

        let b = svc.create_borrower(req).unwrap();
        assert_eq!(b.company_id(), Some(company));
    }

    #[test]
    fn update_checks_credit_rule_before_company_reference() {
        let clock = test_clock();
        let svc = service(&clock);
        let id = svc
            .create_borrower(create_request(Some(CreditRating::B), Some(10_000)))
            .unwrap()
            .id()
            .unwrap();

        let mut req = update_request(Some(CreditRating::B), Some(50_001), 0);
        req.company_id = Some("bogus".to_string());
        let err = svc.update_borrower(id, req).unwrap_err();
        assert!(matches!(err, PartyServiceError::BusinessRuleViolation(_)));

        let mut req = update_request(Some(CreditRating::B), Some(50_000), 0);
        req.company_id = Some("bogus".to_string());
        let err = svc.update_borrower(id, req).unwrap_err();
        assert_eq!(err, PartyServiceError::ResourceNotFound("Invalid company ID: bogus".to_string()));
    }

    #[test]
    fn update_skips_credit_rule_when_a_field_is_missing() {
        let clock = test_clock();
        let svc = service(&clock);
        let id = svc
            .create_borrower(create_request(Some(CreditRating::C), Some(5_000)))
            .unwrap()
            .id()
            .unwrap();

        let updated = svc.update_borrower(id, update_request(None, Some(9_999_999), 0)).unwrap();
        assert_eq!(updated.version(), 1);
        assert_eq!(updated.credit_rating(), None);
        assert_eq!(updated.name(), "Kaito Trading KK");
    }

    #[test]
    fn update_with_stale_version_conflicts() {
        let clock = test_clock();
        let svc = service(&clock);
        let id = svc
            .create_borrower(create_request(Some(CreditRating::A), Some(1)))
            .unwrap()
            .id()
            .unwrap();
        svc.update_borrower(id, update_request(None, None, 0)).unwrap();

        let err = svc.update_borrower(id, update_request(None, None, 0)).unwrap_err();
        assert!(matches!(err, PartyServiceError::ConcurrencyConflict(_)));
    }

    #[test]
    fn update_and_delete_of_missing_borrower_are_not_found() {
        let clock = test_clock();
        let svc = service(&clock);
        let missing = BorrowerId::new(404);
        assert!(matches!(
            svc.update_borrower(missing, update_request(None, None, 0)),
            Err(PartyServiceError::ResourceNotFound(_))
        ));
        assert_eq!(
            svc.delete_borrower(missing).unwrap_err().to_string(),
            "Borrower not found with ID: 404"
        );
    }

    #[test]
    fn deleting_a_company_leaves_borrower_reference_dangling_by_default() {
        let clock = test_clock();
        let svc = service(&clock);
        let company = svc.create_company(company_request("Acme")).unwrap().id().unwrap();
        let mut req = create_request(Some(CreditRating::A), Some(1));
        req.company_id = Some(company.to_string());
        let borrower = svc.create_borrower(req).unwrap().id().unwrap();

        svc.delete_company(company).unwrap();
        assert_eq!(svc.get_borrower(borrower).unwrap().company_id(), Some(company));
    }

    #[test]
    fn search_filters_by_name_and_rating() {
        let clock = test_clock();
        let svc = service(&clock);
        svc.create_borrower(create_request(Some(CreditRating::Bbb), Some(1))).unwrap();
        svc.create_borrower(create_request(Some(CreditRating::Aaa), Some(1))).unwrap();
        let mut other = create_request(Some(CreditRating::Bbb), Some(1));
        other.name = "Nippon Steelworks".to_string();
        svc.create_borrower(other).unwrap();

        let page = svc
            .search_borrowers(Some("kaito"), Some(CreditRating::Bbb), PageRequest::default())
            .unwrap();
        assert_eq!(page.total, 1);

        let by_rating = svc
            .search_borrowers(None, Some(CreditRating::Bbb), PageRequest::default())
            .unwrap();
        assert_eq!(by_rating.total, 2);
    }
}
