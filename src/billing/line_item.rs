//! Extended amount of a single invoice line

use rust_decimal::Decimal;

use crate::error::{BillingError, BillingResult};
use crate::models::Money;

/// Compute `quantity x unit_price`, rounded half-to-even to cents
///
/// Fails with `InvalidQuantity` when `quantity <= 0` and with `InvalidPrice`
/// when the unit price is negative.
pub fn amount(quantity: Decimal, unit_price: Money) -> BillingResult<Money> {
    if quantity <= Decimal::ZERO {
        return Err(BillingError::InvalidQuantity(format!(
            "{} must be greater than zero",
            quantity
        )));
    }
    if unit_price.is_negative() {
        return Err(BillingError::InvalidPrice(format!(
            "{} must not be negative",
            unit_price
        )));
    }

    unit_price.mul_decimal(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_quantity() {
        assert_eq!(
            amount(dec!(2), Money::from_cents(1000)).unwrap(),
            Money::from_cents(2000)
        );
        assert_eq!(amount(dec!(3), Money::zero()).unwrap(), Money::zero());
    }

    #[test]
    fn test_fractional_quantity_rounds_half_even() {
        // 0.5 * 0.25 = 0.125 -> 0.12
        assert_eq!(
            amount(dec!(0.5), Money::from_cents(25)).unwrap(),
            Money::from_cents(12)
        );
        // 1.25 * 10.00 = 12.50 exactly
        assert_eq!(
            amount(dec!(1.25), Money::from_cents(1000)).unwrap(),
            Money::from_cents(1250)
        );
    }

    #[test]
    fn test_doubling_quantity_doubles_amount() {
        let prices = [0, 1, 99, 1234, 1999, 100_000];
        let quantities = [dec!(1), dec!(2), dec!(7), dec!(0.5), dec!(12.5)];

        for cents in prices {
            for q in quantities {
                let price = Money::from_cents(cents);
                let single = amount(q, price).unwrap();
                let double = amount(q * dec!(2), price).unwrap();
                if (price.to_decimal() * q).round_dp(2) == price.to_decimal() * q {
                    assert_eq!(double.cents(), single.cents() * 2, "q={} p={}", q, price);
                }
            }
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            amount(dec!(0), Money::from_cents(100)),
            Err(BillingError::InvalidQuantity(_))
        ));
        assert!(matches!(
            amount(dec!(-2), Money::from_cents(100)),
            Err(BillingError::InvalidQuantity(_))
        ));
        assert!(matches!(
            amount(dec!(1), Money::from_cents(-100)),
            Err(BillingError::InvalidPrice(_))
        ));
    }
}
