//! Dashboard Report
//!
//! Terminal and CSV renderings of the account dashboard summary.

use std::io::Write;

use crate::billing::{AccountSnapshot, DashboardSummary};
use crate::error::BillingResult;
use crate::storage::Storage;

/// Width of the bar in the status distribution chart
const BAR_WIDTH: usize = 30;

/// Dashboard Report
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub summary: DashboardSummary,
}

impl DashboardReport {
    /// Build the report from everything in storage
    pub fn generate(storage: &Storage) -> BillingResult<Self> {
        Self::from_snapshot(&storage.snapshot()?)
    }

    /// Build the report from an already-read snapshot
    pub fn from_snapshot(snapshot: &AccountSnapshot) -> BillingResult<Self> {
        Ok(Self {
            summary: DashboardSummary::build(snapshot)?,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let s = &self.summary;
        let mut output = String::new();

        output.push_str("Dashboard\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Clients:            {}\n", s.client_count));
        output.push_str(&format!("Documents:          {}\n", s.document_count));
        output.push_str(&format!(
            "Paid:               {:>14}\n",
            s.paid_total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Outstanding:        {:>14}\n",
            s.outstanding_total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Billed:             {:>14}\n",
            s.billed_total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Expenses:           {:>14}\n",
            s.expense_total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Net income:         {:>14}\n",
            s.net_income.format_with_symbol(currency)
        ));

        output.push_str("\nInvoices\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for entry in &s.invoice_counts {
            output.push_str(&format!("  {:<12} {:>6}\n", entry.status, entry.count));
        }

        output.push_str("\nMonthly revenue\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if s.monthly_revenue.is_empty() {
            output.push_str("  No paid payments yet.\n");
        }
        for month in &s.monthly_revenue {
            output.push_str(&format!(
                "  {:<10} {:>14} {:>6} paid\n",
                month.month_label,
                month.revenue.format_with_symbol(currency),
                month.payment_count
            ));
        }

        if !s.daily_revenue.is_empty() {
            output.push_str("\nDaily revenue\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for day in &s.daily_revenue {
                output.push_str(&format!(
                    "  {:<10} {:>14}\n",
                    day.label,
                    day.revenue.format_with_symbol(currency)
                ));
            }
        }

        if !s.status_distribution.is_empty() {
            output.push_str("\nBy status\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');

            let max = s
                .status_distribution
                .iter()
                .map(|e| e.total.cents())
                .max()
                .unwrap_or(0);
            for entry in &s.status_distribution {
                let filled = if max > 0 {
                    ((entry.total.cents() as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                output.push_str(&format!(
                    "  {:<10} {:>14} {}\n",
                    entry.status,
                    entry.total.format_with_symbol(currency),
                    "#".repeat(filled)
                ));
            }
        }

        output
    }

    /// Export the report to CSV format
    ///
    /// One row per figure: `Section,Label,Amount,Count`.
    pub fn export_csv<W: Write>(&self, writer: W) -> BillingResult<()> {
        let s = &self.summary;
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv.write_record(["Section", "Label", "Amount", "Count"])?;

        csv.write_record(["Summary", "Clients", "", s.client_count.to_string().as_str()])?;
        csv.write_record(["Summary", "Documents", "", s.document_count.to_string().as_str()])?;
        for (label, amount) in [
            ("Paid", s.paid_total),
            ("Outstanding", s.outstanding_total),
            ("Expenses", s.expense_total),
            ("Net income", s.net_income),
        ] {
            csv.write_record(["Summary", label, amount.to_string().as_str(), ""])?;
        }

        for entry in &s.invoice_counts {
            csv.write_record(["Invoices", entry.status.as_str(), "", entry.count.to_string().as_str()])?;
        }

        for month in &s.monthly_revenue {
            csv.write_record([
                "Monthly",
                month.month_label.as_str(),
                month.revenue.to_string().as_str(),
                month.payment_count.to_string().as_str(),
            ])?;
        }

        for day in &s.daily_revenue {
            csv.write_record(["Daily", day.label.as_str(), day.revenue.to_string().as_str(), ""])?;
        }

        for entry in &s.status_distribution {
            csv.write_record([
                "Status",
                entry.status.as_str(),
                entry.total.to_string().as_str(),
                "",
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Expense, Money, Payment, PaymentStatus};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_snapshot() -> AccountSnapshot {
        let client = Client::new("Acme");
        let payments = vec![
            Payment::with_status(client.id, Money::from_cents(10000), PaymentStatus::Paid, day(2024, 3, 10)).unwrap(),
            Payment::with_status(client.id, Money::from_cents(5000), PaymentStatus::Pending, day(2024, 3, 10)).unwrap(),
            Payment::with_status(client.id, Money::from_cents(2500), PaymentStatus::Overdue, day(2024, 3, 10)).unwrap(),
        ];
        AccountSnapshot {
            clients: vec![client],
            payments,
            expenses: vec![Expense::new(Money::from_cents(3000), day(2024, 3, 12)).unwrap()],
            ..Default::default()
        }
    }

    #[test]
    fn test_terminal_output() {
        let report = DashboardReport::from_snapshot(&sample_snapshot()).unwrap();
        let text = report.format_terminal("$");

        assert!(text.contains("$100.00"));
        assert!(text.contains("$75.00"));
        assert!(text.contains("$70.00"));
        assert!(text.contains("Mar 2024"));
        assert!(text.contains("Mar 10"));
    }

    #[test]
    fn test_empty_account() {
        let report = DashboardReport::from_snapshot(&AccountSnapshot::default()).unwrap();
        let text = report.format_terminal("$");
        assert!(text.contains("No paid payments yet."));
        assert!(!text.contains("By status"));
    }

    #[test]
    fn test_csv_export() {
        let report = DashboardReport::from_snapshot(&sample_snapshot()).unwrap();
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();

        assert!(csv.starts_with("Section,Label,Amount,Count\n"));
        assert!(csv.contains("Summary,Outstanding,75.00,\n"));
        assert!(csv.contains("Monthly,Mar 2024,100.00,1\n"));
        assert!(csv.contains("Status,overdue,25.00,\n"));
        assert!(csv.contains("Invoices,draft,,0\n"));
    }
}
