//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Scaling by a unitless factor (a quantity, a tax rate) goes through
//! `rust_decimal` at full precision and is rounded back to cents with
//! round-half-to-even.
//!
//! Addition and subtraction are checked: a sum that leaves the `i64` cent
//! range is an `InvalidAmount` error, never a wrapped or panicking value.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::error::{BillingError, BillingResult};

/// Number of fractional digits carried by every amount
pub const MONEY_SCALE: u32 = 2;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// Two amounts are equal iff their cent counts are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use billtrack::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Build an amount from a decimal that is already exact at cent precision
    ///
    /// `19.99` and `19.990` are accepted, `19.999` fails with `InvalidAmount`.
    pub fn from_decimal(value: Decimal) -> BillingResult<Self> {
        if value.round_dp(MONEY_SCALE) != value {
            return Err(BillingError::InvalidAmount(format!(
                "{} is not exact at cent precision",
                value
            )));
        }

        let mut scaled = value;
        scaled.rescale(MONEY_SCALE);
        i64::try_from(scaled.mantissa())
            .map(Self)
            .map_err(|_| BillingError::InvalidAmount(format!("{} is out of range", value)))
    }

    /// The amount as a decimal with two fractional digits
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MONEY_SCALE)
    }

    /// Multiply by a unitless factor, rounding the exact product to cents
    /// with round-half-to-even
    pub fn mul_decimal(&self, factor: Decimal) -> BillingResult<Self> {
        let product = self.to_decimal().checked_mul(factor).ok_or_else(|| {
            BillingError::InvalidAmount(format!("{} x {} overflows", self, factor))
        })?;

        Self::from_decimal(
            product.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Add two amounts, failing instead of leaving the cent range
    pub fn checked_add(self, other: Self) -> BillingResult<Self> {
        self.0.checked_add(other.0).map(Self).ok_or_else(|| {
            BillingError::InvalidAmount(format!("{} + {} overflows", self, other))
        })
    }

    /// Subtract two amounts, failing instead of leaving the cent range
    pub fn checked_sub(self, other: Self) -> BillingResult<Self> {
        self.0.checked_sub(other.0).map(Self).ok_or_else(|| {
            BillingError::InvalidAmount(format!("{} - {} overflows", self, other))
        })
    }

    /// Sum amounts; an empty input is zero
    pub fn try_sum<I>(amounts: I) -> BillingResult<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |acc, amount| acc.checked_add(amount))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "10.5". More than
    /// two significant fractional digits is rejected rather than truncated.
    pub fn parse(s: &str) -> BillingResult<Self> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let well_formed = !rest.is_empty()
            && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
            && rest.chars().filter(|c| *c == '.').count() <= 1
            && rest.chars().any(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(BillingError::InvalidAmount(format!(
                "'{}' is not a decimal amount",
                s
            )));
        }

        let value = Decimal::from_str(rest).map_err(|e| {
            BillingError::InvalidAmount(format!("'{}' is not a decimal amount: {}", s, e))
        })?;

        let money = Self::from_decimal(value)?;
        Ok(if negative { -money } else { money })
    }

    /// Parse an amount that must not be negative
    pub fn parse_non_negative(s: &str) -> BillingResult<Self> {
        let money = Self::parse(s)?;
        if money.is_negative() {
            return Err(BillingError::InvalidAmount(format!(
                "{} must not be negative",
                money
            )));
        }
        Ok(money)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = if self.is_negative() {
            format!("-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.dollars(), self.cents_part())
        };
        f.pad(&rendered)
    }
}

impl FromStr for Money {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
