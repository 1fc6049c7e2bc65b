//! Time-bucketed revenue series for trend and distribution charts
//!
//! The monthly and daily series only look at payments that are paid and
//! carry a paid date; anything else is skipped, not counted as zero. The
//! status distribution looks at every payment.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::ledger::checked_amount;
use crate::error::BillingResult;
use crate::models::{Money, Payment, PaymentStatus};

/// Number of most recent months kept in the monthly series
pub const MONTHLY_WINDOW: usize = 6;

/// Number of most recent day buckets kept in the daily series
pub const DAILY_WINDOW: usize = 30;

/// Revenue collected in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    /// Display label, e.g. "Mar 2024"
    pub month_label: String,
    pub revenue: Money,
    pub payment_count: usize,
}

/// Revenue collected on one day label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRevenue {
    /// Display label, e.g. "Mar 10"
    pub label: String,
    pub revenue: Money,
}

/// Total amount of all payments in one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusTotal {
    pub status: PaymentStatus,
    pub total: Money,
}

/// Paid payments with their paid date
fn settled(payments: &[Payment]) -> impl Iterator<Item = (&Payment, NaiveDate)> {
    payments
        .iter()
        .filter(|p| p.status() == PaymentStatus::Paid)
        .filter_map(|p| p.paid_date().map(|date| (p, date)))
}

/// Revenue per calendar month, oldest first, limited to the last
/// [`MONTHLY_WINDOW`] months that have any revenue
pub fn monthly_revenue(payments: &[Payment]) -> BillingResult<Vec<MonthlyRevenue>> {
    let mut buckets: BTreeMap<(i32, u32), (Money, usize)> = BTreeMap::new();

    for (payment, date) in settled(payments) {
        let amount = checked_amount(payment)?;
        let entry = buckets
            .entry((date.year(), date.month()))
            .or_insert((Money::zero(), 0));
        entry.0 = entry.0.checked_add(amount)?;
        entry.1 += 1;
    }

    let skip = buckets.len().saturating_sub(MONTHLY_WINDOW);
    let series: Vec<_> = buckets
        .into_iter()
        .skip(skip)
        .map(|((year, month), (revenue, payment_count))| MonthlyRevenue {
            year,
            month,
            month_label: month_label(year, month),
            revenue,
            payment_count,
        })
        .collect();

    debug!(months = series.len(), dropped = skip, "bucketed monthly revenue");
    Ok(series)
}

/// Revenue per day label, limited to the last [`DAILY_WINDOW`] buckets
///
/// Payments are visited in paid-date order and buckets keep the order in
/// which their label first appeared. The key is the "Mon DD" label alone, so
/// the same day in two different years lands in one bucket.
pub fn daily_timeline(payments: &[Payment]) -> BillingResult<Vec<DailyRevenue>> {
    let mut paid: Vec<_> = settled(payments).collect();
    paid.sort_by_key(|(_, date)| *date);

    let mut series: Vec<DailyRevenue> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (payment, date) in paid {
        let amount = checked_amount(payment)?;
        let label = day_label(date);
        match index.get(&label) {
            Some(&i) => series[i].revenue = series[i].revenue.checked_add(amount)?,
            None => {
                index.insert(label.clone(), series.len());
                series.push(DailyRevenue {
                    label,
                    revenue: amount,
                });
            }
        }
    }

    let skip = series.len().saturating_sub(DAILY_WINDOW);
    series.drain(..skip);

    debug!(days = series.len(), dropped = skip, "bucketed daily revenue");
    Ok(series)
}

/// Total per status across all payments, in the order paid, pending, overdue,
/// omitting statuses whose total is zero
pub fn status_distribution(payments: &[Payment]) -> BillingResult<Vec<StatusTotal>> {
    let mut sums: HashMap<PaymentStatus, Money> = HashMap::new();
    for payment in payments {
        let sum = sums.entry(payment.status()).or_default();
        *sum = sum.checked_add(checked_amount(payment)?)?;
    }

    Ok(PaymentStatus::ALL
        .iter()
        .filter_map(|status| {
            sums.get(status)
                .filter(|total| total.is_positive())
                .map(|total| StatusTotal {
                    status: *status,
                    total: *total,
                })
        })
        .collect())
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

fn day_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}
