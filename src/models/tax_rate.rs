//! Flat percentage tax rate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BillingError, BillingResult};

/// A tax rate expressed in percent, within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Create a tax rate from a percentage
    pub fn new(percent: Decimal) -> BillingResult<Self> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(BillingError::InvalidTaxRate(format!(
                "{}% is outside 0-100",
                percent
            )));
        }
        Ok(Self(percent.normalize()))
    }

    /// No tax
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The rate in percent
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// The rate as a fraction (10% -> 0.1)
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Parse a percentage, with or without a trailing '%'
    pub fn parse(s: &str) -> BillingResult<Self> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
        let value = Decimal::from_str(trimmed.trim())
            .map_err(|_| BillingError::InvalidTaxRate(format!("'{}' is not a number", s)))?;
        Self::new(value)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}%", self.0))
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = BillingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bounds() {
        assert!(TaxRate::new(dec!(0)).is_ok());
        assert!(TaxRate::new(dec!(100)).is_ok());
        assert!(matches!(
            TaxRate::new(dec!(100.01)),
            Err(BillingError::InvalidTaxRate(_))
        ));
        assert!(matches!(
            TaxRate::new(dec!(-1)),
            Err(BillingError::InvalidTaxRate(_))
        ));
    }

    #[test]
    fn test_parse_and_display() {
        let rate = TaxRate::parse("8.25%").unwrap();
        assert_eq!(rate.percent(), dec!(8.25));
        assert_eq!(rate.fraction(), dec!(0.0825));
        assert_eq!(rate.to_string(), "8.25%");
        assert_eq!(TaxRate::parse("10.0").unwrap().to_string(), "10%");
    }
}
