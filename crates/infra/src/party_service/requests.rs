//! Inbound request DTOs.
//!
//! Field types are already validated by whatever deserialised them; the only
//! loosely-typed field is `company_id`, which arrives as an optional string
//! that may be blank or malformed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use synloan_core::Money;
use synloan_parties::{CompanyDetails, CreditRating, Industry, InvestorType};

// -------------------------
// Company
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCompanyRequest {
    pub company_name: String,
    pub registration_number: Option<String>,
    pub industry: Option<Industry>,
    pub address: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCompanyRequest {
    pub company_name: String,
    pub registration_number: Option<String>,
    pub industry: Option<Industry>,
    pub address: Option<String>,
    pub country: Option<String>,
    /// Version the caller last read.
    pub version: u64,
}

impl From<CreateCompanyRequest> for CompanyDetails {
    fn from(r: CreateCompanyRequest) -> Self {
        CompanyDetails {
            company_name: r.company_name,
            registration_number: r.registration_number,
            industry: r.industry,
            address: r.address,
            country: r.country,
        }
    }
}

impl From<UpdateCompanyRequest> for CompanyDetails {
    fn from(r: UpdateCompanyRequest) -> Self {
        CompanyDetails {
            company_name: r.company_name,
            registration_number: r.registration_number,
            industry: r.industry,
            address: r.address,
            country: r.country,
        }
    }
}

// -------------------------
// Borrower
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBorrowerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub company_id: Option<String>,
    pub credit_limit: Option<Money>,
    pub credit_rating: Option<CreditRating>,
    /// Skip the rating ceiling check at registration.
    #[serde(default)]
    pub credit_limit_override: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBorrowerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub company_id: Option<String>,
    pub credit_limit: Option<Money>,
    pub credit_rating: Option<CreditRating>,
    pub version: u64,
}

// -------------------------
// Investor
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvestorRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub company_id: Option<String>,
    pub investment_capacity: Option<Decimal>,
    pub investor_type: Option<InvestorType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInvestorRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub company_id: Option<String>,
    pub investment_capacity: Option<Decimal>,
    pub investor_type: Option<InvestorType>,
    /// Leave unset to keep the stored flag.
    #[serde(default)]
    pub is_active: Option<bool>,
    pub version: u64,
}
