//! Parties domain module (companies, borrowers, investors).
//!
//! This crate contains the party entities and their business rules, implemented
//! purely as deterministic domain logic (no IO, no storage, no clock access).

pub mod borrower;
pub mod classification;
pub mod company;
pub mod ids;
pub mod investor;
pub mod rating;

pub use borrower::{Borrower, BorrowerCriterion, BorrowerDetails};
pub use classification::{Industry, InvestorType};
pub use company::{Company, CompanyCriterion, CompanyDetails};
pub use ids::{BorrowerId, CompanyId, InvestorId};
pub use investor::{Investor, InvestorCriterion, InvestorDetails};
pub use rating::CreditRating;
