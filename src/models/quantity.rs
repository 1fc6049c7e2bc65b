//! Line item quantities
//!
//! A quantity is a strictly positive decimal so that fractional units such as
//! 1.5 hours can be billed exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BillingError, BillingResult};

/// A strictly positive, unitless quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a quantity, rejecting zero and negative values
    pub fn new(value: Decimal) -> BillingResult<Self> {
        if value <= Decimal::ZERO {
            return Err(BillingError::InvalidQuantity(format!(
                "{} must be greater than zero",
                value
            )));
        }
        Ok(Self(value.normalize()))
    }

    /// Create a whole-number quantity
    pub fn whole(units: u32) -> BillingResult<Self> {
        Self::new(Decimal::from(units))
    }

    /// Get the underlying decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Parse a quantity from user input ("2", "1.5")
    pub fn parse(s: &str) -> BillingResult<Self> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| BillingError::InvalidQuantity(format!("'{}' is not a number", s)))?;
        Self::new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = BillingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
