//! Paid vs outstanding balances over a set of payments
//!
//! The aggregator is client-agnostic: it sums whatever payments it is given.
//! Scope to one client by filtering first, e.g. with [`for_client`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{BillingError, BillingResult};
use crate::models::{ClientId, Money, Payment, PaymentStatus};

/// Summed balances of a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LedgerSummary {
    /// Sum of paid payments
    pub paid_total: Money,
    /// Sum of pending and overdue payments
    pub outstanding_total: Money,
}

impl LedgerSummary {
    /// Everything billed, paid or not
    pub fn total(&self) -> BillingResult<Money> {
        self.paid_total.checked_add(self.outstanding_total)
    }
}

/// Sum payments into paid and outstanding totals
///
/// Empty input yields zeros. Amounts are assumed validated when the payment
/// was created; a negative stored amount is a data-integrity problem and is
/// reported as `InvalidAmount`.
pub fn summarize<'a, I>(payments: I) -> BillingResult<LedgerSummary>
where
    I: IntoIterator<Item = &'a Payment>,
{
    let mut summary = LedgerSummary::default();
    let mut count = 0usize;

    for payment in payments {
        let amount = checked_amount(payment)?;
        match payment.status() {
            PaymentStatus::Paid => {
                summary.paid_total = summary.paid_total.checked_add(amount)?;
            }
            PaymentStatus::Pending | PaymentStatus::Overdue => {
                summary.outstanding_total = summary.outstanding_total.checked_add(amount)?;
            }
        }
        count += 1;
    }

    debug!(
        payments = count,
        paid = %summary.paid_total,
        outstanding = %summary.outstanding_total,
        "summarized ledger"
    );
    Ok(summary)
}

/// Payments owned by one client
pub fn for_client(payments: &[Payment], client_id: ClientId) -> impl Iterator<Item = &Payment> {
    payments.iter().filter(move |p| p.client_id == client_id)
}

/// A payment's amount, refusing stored values that break the non-negative rule
pub(crate) fn checked_amount(payment: &Payment) -> BillingResult<Money> {
    let amount = payment.amount();
    if amount.is_negative() {
        warn!(payment = %payment.id, %amount, "stored payment amount is negative");
        return Err(BillingError::InvalidAmount(format!(
            "stored amount {} on payment {} is negative",
            amount, payment.id
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment(client: ClientId, cents: i64, status: PaymentStatus) -> Payment {
        Payment::with_status(client, Money::from_cents(cents), status, day(2024, 3, 10)).unwrap()
    }

    #[test]
    fn test_empty_ledger() {
        let summary = summarize(&Vec::<Payment>::new()).unwrap();
        assert_eq!(summary, LedgerSummary::default());
        assert!(summary.total().unwrap().is_zero());
    }

    #[test]
    fn test_paid_and_outstanding() {
        let client = ClientId::new();
        let payments = vec![
            payment(client, 10_000, PaymentStatus::Paid),
            payment(client, 5_000, PaymentStatus::Pending),
            payment(client, 2_500, PaymentStatus::Overdue),
        ];

        let summary = summarize(&payments).unwrap();
        assert_eq!(summary.paid_total.to_string(), "100.00");
        assert_eq!(summary.outstanding_total.to_string(), "75.00");
    }

    #[test]
    fn test_every_payment_lands_in_one_bucket() {
        let client = ClientId::new();
        let statuses = [
            PaymentStatus::Paid,
            PaymentStatus::Pending,
            PaymentStatus::Overdue,
        ];
        let payments: Vec<_> = (0..30)
            .map(|i| payment(client, i * 137 + 1, statuses[(i % 3) as usize]))
            .collect();

        let summary = summarize(&payments).unwrap();
        let all = Money::try_sum(payments.iter().map(Payment::amount)).unwrap();
        assert_eq!(summary.total().unwrap(), all);
    }

    #[test]
    fn test_sum_past_cent_range_is_an_error() {
        let client = ClientId::new();
        let huge = Money::parse("90000000000000000").unwrap();
        let payments = vec![
            Payment::with_status(client, huge, PaymentStatus::Paid, day(2024, 3, 10)).unwrap(),
            Payment::with_status(client, huge, PaymentStatus::Paid, day(2024, 3, 11)).unwrap(),
        ];

        assert!(matches!(
            summarize(&payments),
            Err(BillingError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let client = ClientId::new();
        let payments = vec![
            payment(client, 1_999, PaymentStatus::Paid),
            payment(client, 1, PaymentStatus::Overdue),
        ];
        assert_eq!(summarize(&payments).unwrap(), summarize(&payments).unwrap());
    }

    #[test]
    fn test_scoped_to_client() {
        let a = ClientId::new();
        let b = ClientId::new();
        let payments = vec![
            payment(a, 1_000, PaymentStatus::Paid),
            payment(b, 7_000, PaymentStatus::Paid),
            payment(a, 300, PaymentStatus::Pending),
        ];

        let summary = summarize(for_client(&payments, a)).unwrap();
        assert_eq!(summary.paid_total, Money::from_cents(1_000));
        assert_eq!(summary.outstanding_total, Money::from_cents(300));
    }

    #[test]
    fn test_negative_stored_amount_is_integrity_error() {
        let client = ClientId::new();
        let good = payment(client, 100, PaymentStatus::Paid);
        let mut json = serde_json::to_value(&good).unwrap();
        json["amount"] = serde_json::json!(-100);
        let corrupt: Payment = serde_json::from_value(json).unwrap();

        assert!(matches!(
            summarize(&[good, corrupt]),
            Err(BillingError::InvalidAmount(_))
        ));
    }
}
