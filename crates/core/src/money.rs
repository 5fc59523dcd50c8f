//! Monetary amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A monetary amount in the facility currency.
///
/// Signed: the domain does not floor balances at zero (see `Investor`), so
/// subtraction may go negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_positive_or_zero(&self) -> bool {
        !self.0.is_sign_negative() || self.0.is_zero()
    }

    pub fn is_greater_than(&self, other: Money) -> bool {
        self.0 > other.0
    }

    pub fn add(self, other: Money) -> Self {
        Self(self.0 + other.0)
    }

    pub fn subtract(self, other: Money) -> Self {
        Self(self.0 - other.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0.normalize(), f)
    }
}
