//! Monetary value objects.
//!
//! Amounts are exact decimals (`rust_decimal`) so that ledger arithmetic never picks up
//! binary floating-point drift. No currency is attached: every account of a run shares
//! one implicit currency.

use core::ops::Neg;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const MONTHS_PER_YEAR: i64 = 12;

/// A decimal amount of money (balance, deposit or withdrawal request).
///
/// The type itself accepts any sign so that requests can be validated at the domain
/// boundary; balances are kept non-negative by the account aggregate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl ValueObject for Amount {}

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Validate that this amount can be used as a ledger request.
    pub fn ensure_positive(self, what: &str) -> DomainResult<Amount> {
        if self.is_positive() {
            Ok(self)
        } else {
            Err(DomainError::validation(format!(
                "{what} must be positive (got {self})"
            )))
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Annual interest rate as a non-negative fraction (`0.07` = 7%).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct InterestRate(Decimal);

impl ValueObject for InterestRate {}

impl InterestRate {
    pub fn new(rate: Decimal) -> DomainResult<Self> {
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(DomainError::validation(format!(
                "interest rate cannot be negative (got {rate})"
            )));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Interest accrued over one month: `(balance * rate) / 12`.
    ///
    /// Saturates at `Decimal::MAX` instead of panicking on overflow.
    pub fn monthly_interest(&self, balance: Amount) -> Amount {
        Amount(balance.0.saturating_mul(self.0) / Decimal::from(MONTHS_PER_YEAR))
    }
}

impl TryFrom<Decimal> for InterestRate {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InterestRate> for Decimal {
    fn from(value: InterestRate) -> Self {
        value.0
    }
}

impl core::fmt::Display for InterestRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_compare_by_value_regardless_of_scale() {
        assert_eq!(Amount::new(dec!(10)), Amount::new(dec!(10.00)));
        assert!(Amount::new(dec!(0.01)) > Amount::ZERO);
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(Amount::ZERO.ensure_positive("amount").is_err());
        assert!(Amount::from(-5).ensure_positive("amount").is_err());
        assert_eq!(Amount::from(5).ensure_positive("amount"), Ok(Amount::from(5)));
    }

    #[test]
    fn checked_add_reports_overflow() {
        let max = Amount::new(Decimal::MAX);
        assert_eq!(max.checked_add(Amount::from(1)), None);
    }

    #[test]
    fn monthly_interest_is_balance_times_rate_over_twelve() {
        let rate = InterestRate::new(dec!(0.07)).unwrap();
        let interest = rate.monthly_interest(Amount::new(dec!(20000)));
        assert_eq!(interest.value(), dec!(20000) * dec!(0.07) / dec!(12));
        assert!(interest.value() > dec!(116.66) && interest.value() < dec!(116.67));
    }

    #[test]
    fn negative_rate_is_rejected() {
        assert!(InterestRate::new(dec!(-0.01)).is_err());
        assert!(InterestRate::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn rate_deserialization_validates() {
        let err = serde_json::from_str::<InterestRate>("\"-1\"");
        assert!(err.is_err());
        let ok: InterestRate = serde_json::from_str("\"0.05\"").unwrap();
        assert_eq!(ok.value(), dec!(0.05));
    }
}
