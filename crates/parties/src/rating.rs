//! Borrower credit ratings and the credit-limit ceiling each one allows.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use synloan_core::{DomainError, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditRating {
    Aaa,
    Aa,
    A,
    Bbb,
    Bb,
    B,
    Ccc,
    Cc,
    C,
    D,
}

impl CreditRating {
    pub const ALL: [CreditRating; 10] = [
        CreditRating::Aaa,
        CreditRating::Aa,
        CreditRating::A,
        CreditRating::Bbb,
        CreditRating::Bb,
        CreditRating::B,
        CreditRating::Ccc,
        CreditRating::Cc,
        CreditRating::C,
        CreditRating::D,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRating::Aaa => "AAA",
            CreditRating::Aa => "AA",
            CreditRating::A => "A",
            CreditRating::Bbb => "BBB",
            CreditRating::Bb => "BB",
            CreditRating::B => "B",
            CreditRating::Ccc => "CCC",
            CreditRating::Cc => "CC",
            CreditRating::C => "C",
            CreditRating::D => "D",
        }
    }

    /// Maximum credit limit a borrower with this rating may be granted.
    pub fn max_limit(&self) -> Money {
        let units: i64 = match self {
            CreditRating::Aaa => 5_000_000,
            CreditRating::Aa => 1_000_000,
            CreditRating::A => 500_000,
            CreditRating::Bbb => 200_000,
            CreditRating::Bb => 100_000,
            CreditRating::B => 50_000,
            CreditRating::Ccc => 20_000,
            CreditRating::Cc => 10_000,
            CreditRating::C => 5_000,
            CreditRating::D => 0,
        };
        Money::new(Decimal::from(units))
    }

    pub fn is_limit_satisfied(&self, limit: Money) -> bool {
        !limit.is_greater_than(self.max_limit())
    }
}

impl core::fmt::Display for CreditRating {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditRating {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        CreditRating::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| DomainError::validation(format!("unknown credit rating: {s:?}")))
    }
}
