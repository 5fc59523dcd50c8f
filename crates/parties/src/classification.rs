//! Categorical attributes used for filtering parties.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use synloan_core::DomainError;

/// Industry sector of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Industry {
    Tech,
    Finance,
    Manufacturing,
    Retail,
    Healthcare,
    Energy,
    RealEstate,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 8] = [
        Industry::Tech,
        Industry::Finance,
        Industry::Manufacturing,
        Industry::Retail,
        Industry::Healthcare,
        Industry::Energy,
        Industry::RealEstate,
        Industry::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Tech => "TECH",
            Industry::Finance => "FINANCE",
            Industry::Manufacturing => "MANUFACTURING",
            Industry::Retail => "RETAIL",
            Industry::Healthcare => "HEALTHCARE",
            Industry::Energy => "ENERGY",
            Industry::RealEstate => "REAL_ESTATE",
            Industry::Other => "OTHER",
        }
    }
}

/// Kind of institution behind an investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestorType {
    Bank,
    InsuranceCompany,
    Fund,
    PensionFund,
    Corporate,
    Individual,
    Government,
    Other,
}

impl InvestorType {
    pub const ALL: [InvestorType; 8] = [
        InvestorType::Bank,
        InvestorType::InsuranceCompany,
        InvestorType::Fund,
        InvestorType::PensionFund,
        InvestorType::Corporate,
        InvestorType::Individual,
        InvestorType::Government,
        InvestorType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestorType::Bank => "BANK",
            InvestorType::InsuranceCompany => "INSURANCE_COMPANY",
            InvestorType::Fund => "FUND",
            InvestorType::PensionFund => "PENSION_FUND",
            InvestorType::Corporate => "CORPORATE",
            InvestorType::Individual => "INDIVIDUAL",
            InvestorType::Government => "GOVERNMENT",
            InvestorType::Other => "OTHER",
        }
    }
}

macro_rules! impl_wire_enum {
    ($t:ty, $name:literal) => {
        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_uppercase();
                <$t>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| DomainError::validation(format!("unknown {}: {s:?}", $name)))
            }
        }
    };
}

impl_wire_enum!(Industry, "industry");
impl_wire_enum!(InvestorType, "investor type");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("tech".parse::<Industry>().unwrap(), Industry::Tech);
        assert_eq!(" real_estate ".parse::<Industry>().unwrap(), Industry::RealEstate);
        assert_eq!("Pension_Fund".parse::<InvestorType>().unwrap(), InvestorType::PensionFund);
    }

    #[test]
    fn unknown_values_are_validation_errors() {
        assert!(matches!("mining".parse::<Industry>(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&InvestorType::InsuranceCompany).unwrap();
        assert_eq!(json, "\"INSURANCE_COMPANY\"");
        let back: Industry = serde_json::from_str("\"REAL_ESTATE\"").unwrap();
        assert_eq!(back, Industry::RealEstate);
    }

    #[test]
    fn display_matches_wire_form() {
        for i in Industry::ALL {
            assert_eq!(i.to_string().parse::<Industry>().unwrap(), i);
        }
    }
}
