//! Client Statement
//!
//! Everything billed to one client: ledger balances, payments and invoices.

use crate::billing::ledger::{summarize, LedgerSummary};
use crate::billing::AccountSnapshot;
use crate::error::{BillingError, BillingResult};
use crate::models::{Client, ClientId, Invoice, Money, Payment};
use crate::storage::Storage;

/// Client Statement
#[derive(Debug, Clone)]
pub struct ClientStatement {
    pub client: Client,
    /// Paid and outstanding totals over the client's payments
    pub ledger: LedgerSummary,
    pub payments: Vec<Payment>,
    pub invoices: Vec<Invoice>,
    /// Sum of totals of invoices that are not cancelled
    pub invoiced_total: Money,
}

impl ClientStatement {
    /// Build the statement for one client from storage
    pub fn generate(storage: &Storage, client_id: ClientId) -> BillingResult<Self> {
        Self::from_snapshot(&storage.snapshot()?, client_id)
    }

    /// Build the statement from an already-read snapshot
    pub fn from_snapshot(snapshot: &AccountSnapshot, client_id: ClientId) -> BillingResult<Self> {
        let scoped = snapshot.for_client(client_id);
        let client = scoped
            .clients
            .into_iter()
            .next()
            .ok_or_else(|| BillingError::client_not_found(client_id.to_string()))?;

        let ledger = summarize(&scoped.payments)?;
        let invoiced_total = Money::try_sum(
            scoped
                .invoices
                .iter()
                .filter(|i| i.status.is_billable())
                .map(|i| i.total()),
        )?;

        let mut payments = scoped.payments;
        payments.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        let mut invoices = scoped.invoices;
        invoices.sort_by(|a, b| a.issue_date.cmp(&b.issue_date));

        Ok(Self {
            client,
            ledger,
            payments,
            invoices,
            invoiced_total,
        })
    }

    /// Format the statement for terminal display
    pub fn format_terminal(&self, currency: &str, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Statement: {}\n", self.client));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        if let Some(email) = &self.client.email {
            output.push_str(&format!("Email:        {}\n", email));
        }
        if let Some(phone) = &self.client.phone {
            output.push_str(&format!("Phone:        {}\n", phone));
        }
        output.push_str(&format!(
            "Paid:         {:>14}\n",
            self.ledger.paid_total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Outstanding:  {:>14}\n",
            self.ledger.outstanding_total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Invoiced:     {:>14}\n",
            self.invoiced_total.format_with_symbol(currency)
        ));

        output.push_str(&format!("\nPayments ({})\n", self.payments.len()));
        output.push_str(&"-".repeat(70));
        output.push('\n');
        for payment in &self.payments {
            let due = payment
                .due_date
                .map(|d| d.format(date_format).to_string())
                .unwrap_or_else(|| "-".into());
            let paid = payment
                .paid_date()
                .map(|d| d.format(date_format).to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "  {:<12} {:>14} {:<8} due {:<10} {}\n",
                payment.id.to_string(),
                payment.amount().format_with_symbol(currency),
                payment.status(),
                due,
                paid
            ));
        }

        output.push_str(&format!("\nInvoices ({})\n", self.invoices.len()));
        output.push_str(&"-".repeat(70));
        output.push('\n');
        for invoice in &self.invoices {
            output.push_str(&format!(
                "  {:<12} {:<10} {:>14} {}\n",
                invoice.invoice_number,
                invoice.issue_date.format(date_format).to_string(),
                invoice.total().format_with_symbol(currency),
                invoice.status
            ));
        }

        output
    }
}
