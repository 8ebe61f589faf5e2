//! Type-safe price representation using decimal arithmetic.
//!
//! Prices arrive from the catalog source as JSON numbers (`109.95`, `22`).
//! They are held as [`Decimal`] so cart totals sum exactly, and are written
//! back out as JSON numbers so a stored cart reads like the catalog payload.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a line quantity.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Format with exactly two decimal places (`19.98`, `22.00`).
    ///
    /// Halves round away from zero.
    #[must_use]
    pub fn to_fixed(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed())
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at [`Decimal::MAX`].
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        Price::new(s.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let p: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(p, price("109.95"));
    }

    #[test]
    fn test_deserialize_from_json_integer() {
        let p: Price = serde_json::from_str("22").unwrap();
        assert_eq!(p.to_fixed(), "22.00");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("-1.5");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_as_json_number() {
        assert_eq!(serde_json::to_string(&price("9.99")).unwrap(), "9.99");
    }

    #[test]
    fn test_to_fixed_pads_and_rounds() {
        assert_eq!(Price::ZERO.to_fixed(), "0.00");
        assert_eq!(price("7.5").to_fixed(), "7.50");
        assert_eq!(price("0.005").to_fixed(), "0.01");
        assert_eq!(price("19.994").to_fixed(), "19.99");
    }

    #[test]
    fn test_times_and_sum_are_exact() {
        let line = price("9.99").times(2);
        assert_eq!(line.to_fixed(), "19.98");

        let total: Price = [price("0.1"), price("0.2")].into_iter().sum();
        assert_eq!(total, price("0.3"));
    }

    #[test]
    fn test_huge_prices_saturate_instead_of_overflowing() {
        let huge: Price = serde_json::from_str("50000000000000000000000000000").unwrap();

        assert_eq!(huge.times(2).amount(), Decimal::MAX);
        assert_eq!((huge + huge).amount(), Decimal::MAX);

        let total: Price = [huge, huge, price("1")].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
        assert_eq!(total.to_fixed(), "79228162514264337593543950335.00");
    }

    #[test]
    fn test_new_accepts_zero() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
        assert!(matches!(
            Price::new(Decimal::NEGATIVE_ONE),
            Err(PriceError::Negative(_))
        ));
    }
}
