//! Dashboard summary
//!
//! Composes the ledger totals, the three revenue series and a few counts
//! into one value. Rebuilt from scratch on every call; there is no cache.

use serde::Serialize;
use tracing::debug;

use super::ledger::{summarize, LedgerSummary};
use super::snapshot::AccountSnapshot;
use super::timeseries::{
    daily_timeline, monthly_revenue, status_distribution, DailyRevenue, MonthlyRevenue,
    StatusTotal,
};
use crate::error::{BillingError, BillingResult};
use crate::models::{Expense, InvoiceStatus, Money};

/// Number of invoices in one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceStatusCount {
    pub status: InvoiceStatus,
    pub count: usize,
}

/// Everything the dashboard shows, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub client_count: usize,
    pub document_count: usize,
    pub paid_total: Money,
    pub outstanding_total: Money,
    /// Paid plus outstanding
    pub billed_total: Money,
    /// Sum of all expenses
    pub expense_total: Money,
    /// Paid revenue minus expenses; may be negative
    pub net_income: Money,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub daily_revenue: Vec<DailyRevenue>,
    pub status_distribution: Vec<StatusTotal>,
    pub invoice_counts: Vec<InvoiceStatusCount>,
}

impl DashboardSummary {
    /// Build the summary for an account snapshot
    pub fn build(snapshot: &AccountSnapshot) -> BillingResult<Self> {
        let LedgerSummary {
            paid_total,
            outstanding_total,
        } = summarize(&snapshot.payments)?;

        let expense_total = expense_total(&snapshot.expenses)?;

        let invoice_counts = InvoiceStatus::ALL
            .iter()
            .map(|status| InvoiceStatusCount {
                status: *status,
                count: snapshot
                    .invoices
                    .iter()
                    .filter(|i| i.status == *status)
                    .count(),
            })
            .collect();

        let summary = Self {
            client_count: snapshot.clients.len(),
            document_count: snapshot.documents.len(),
            paid_total,
            outstanding_total,
            billed_total: paid_total.checked_add(outstanding_total)?,
            expense_total,
            net_income: paid_total.checked_sub(expense_total)?,
            monthly_revenue: monthly_revenue(&snapshot.payments)?,
            daily_revenue: daily_timeline(&snapshot.payments)?,
            status_distribution: status_distribution(&snapshot.payments)?,
            invoice_counts,
        };

        debug!(
            clients = summary.client_count,
            documents = summary.document_count,
            paid = %summary.paid_total,
            outstanding = %summary.outstanding_total,
            "built dashboard summary"
        );
        Ok(summary)
    }
}

/// Sum of expense amounts; a negative stored amount is an integrity error
pub fn expense_total(expenses: &[Expense]) -> BillingResult<Money> {
    expenses.iter().try_fold(Money::zero(), |acc, expense| {
        let amount = expense.amount();
        if amount.is_negative() {
            return Err(BillingError::InvalidAmount(format!(
                "stored amount {} on expense {} is negative",
                amount, expense.id
            )));
        }
        acc.checked_add(amount)
    })
}
