//! Payment status classification
//!
//! Three states: pending, overdue, paid. Pending and overdue are both
//! outstanding. Paid can be reverted. Moving into paid stamps the paid date
//! with the transition date; moving anywhere else clears it. Overdue is only
//! ever assigned by the caller, never derived from the due date here.

use chrono::NaiveDate;

use crate::error::{BillingError, BillingResult};
use crate::models::{Money, PaymentStatus};

/// Validate raw status and amount input for a payment
pub fn classify(status: &str, amount: &str) -> BillingResult<(PaymentStatus, Money)> {
    let status: PaymentStatus = status.parse()?;
    let amount = Money::parse(amount)?;
    validate_amount(amount)?;
    Ok((status, amount))
}

/// Payment amounts must not be negative
pub fn validate_amount(amount: Money) -> BillingResult<()> {
    if amount.is_negative() {
        return Err(BillingError::InvalidAmount(format!(
            "payment amount {} must not be negative",
            amount
        )));
    }
    Ok(())
}

/// The paid date a payment should carry after moving from `current` to `next`
/// on date `on`
///
/// Re-asserting paid on an already paid payment is not a transition, so the
/// original paid date is kept.
pub fn paid_date_after(
    current: PaymentStatus,
    current_paid_date: Option<NaiveDate>,
    next: PaymentStatus,
    on: NaiveDate,
) -> Option<NaiveDate> {
    match (current, next) {
        (PaymentStatus::Paid, PaymentStatus::Paid) => current_paid_date.or(Some(on)),
        (_, PaymentStatus::Paid) => Some(on),
        (_, PaymentStatus::Pending | PaymentStatus::Overdue) => None,
    }
}

/// A paid date is present iff the status is paid
pub fn check_paid_date(status: PaymentStatus, paid_date: Option<NaiveDate>) -> BillingResult<()> {
    match (status, paid_date) {
        (PaymentStatus::Paid, None) => Err(BillingError::InvalidStatus(
            "paid payment has no paid date".into(),
        )),
        (PaymentStatus::Pending | PaymentStatus::Overdue, Some(date)) => {
            Err(BillingError::InvalidStatus(format!(
                "{} payment carries paid date {}",
                status.as_str(),
                date
            )))
        }
        _ => Ok(()),
    }
}
