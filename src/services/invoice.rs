//! Invoice service
//!
//! Creates invoices with the account defaults applied, and edits their line
//! items, tax rate and status. Totals are always recomputed by the invoice
//! itself; this layer only persists the result.

use chrono::{Days, NaiveDate};
use tracing::info;

use crate::config::settings::Settings;
use crate::error::{BillingError, BillingResult};
use crate::models::{ClientId, Invoice, InvoiceId, InvoiceStatus, LineItem, TaxRate};
use crate::storage::Storage;

/// Service for invoice management
pub struct InvoiceService<'a> {
    storage: &'a Storage,
}

impl<'a> InvoiceService<'a> {
    /// Create a new invoice service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an empty draft invoice
    ///
    /// Without a due date the invoice is due `payment_terms_days` after issue.
    /// The tax rate starts at the configured default.
    pub fn create(
        &self,
        client_id: ClientId,
        invoice_number: &str,
        issue_date: NaiveDate,
        due_date: Option<NaiveDate>,
        settings: &Settings,
    ) -> BillingResult<Invoice> {
        if !self.storage.clients.exists(client_id)? {
            return Err(BillingError::client_not_found(client_id.to_string()));
        }

        let invoice_number = invoice_number.trim();
        if self.find_by_number(invoice_number)?.is_some() {
            return Err(BillingError::Duplicate {
                entity_type: "Invoice",
                identifier: invoice_number.to_string(),
            });
        }

        let due_date = match due_date {
            Some(date) => date,
            None => issue_date
                .checked_add_days(Days::new(u64::from(settings.payment_terms_days)))
                .ok_or_else(|| {
                    BillingError::Validation(format!(
                        "Due date out of range for issue date {}",
                        issue_date
                    ))
                })?,
        };

        let mut invoice = Invoice::new(client_id, invoice_number, issue_date, due_date)?;
        invoice.set_tax_rate(settings.default_tax_rate)?;

        self.storage.invoices.upsert(invoice.clone())?;
        self.storage.invoices.save()?;

        info!(
            invoice = %invoice.id,
            number = %invoice.invoice_number,
            client = %client_id,
            "created invoice"
        );
        Ok(invoice)
    }

    /// Next free number of the form `INV-0001`
    pub fn next_invoice_number(&self) -> BillingResult<String> {
        let mut n = self.storage.invoices.count()? + 1;
        loop {
            let candidate = format!("INV-{:04}", n);
            if self.find_by_number(&candidate)?.is_none() {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    pub fn get(&self, id: InvoiceId) -> BillingResult<Option<Invoice>> {
        self.storage.invoices.get(id)
    }

    /// Find an invoice by its number, ignoring case
    pub fn find_by_number(&self, number: &str) -> BillingResult<Option<Invoice>> {
        let wanted = number.trim().to_lowercase();
        Ok(self
            .storage
            .invoices
            .filter(|i| i.invoice_number.to_lowercase() == wanted)?
            .into_iter()
            .next())
    }

    /// Find an invoice by number or by full or short ID
    pub fn resolve(&self, identifier: &str) -> BillingResult<Invoice> {
        if let Some(invoice) = self.find_by_number(identifier)? {
            return Ok(invoice);
        }
        self.storage
            .invoices
            .find_by_short_id(identifier)?
            .ok_or_else(|| BillingError::invoice_not_found(identifier))
    }

    /// All invoices, oldest first
    pub fn list(&self) -> BillingResult<Vec<Invoice>> {
        self.storage.invoices.get_all()
    }

    /// Invoices billed to one client
    pub fn list_for_client(&self, client_id: ClientId) -> BillingResult<Vec<Invoice>> {
        self.storage.invoices.filter(|i| i.client_id == client_id)
    }

    /// Append a line item
    pub fn add_item(&self, id: InvoiceId, item: LineItem) -> BillingResult<Invoice> {
        self.modify(id, "added line item", |invoice| invoice.add_item(item))
    }

    /// Remove the line at 1-based position `line`
    pub fn remove_item(&self, id: InvoiceId, line: usize) -> BillingResult<Invoice> {
        if line == 0 {
            return Err(BillingError::Validation(
                "Line numbers start at 1".into(),
            ));
        }
        self.modify(id, "removed line item", |invoice| {
            invoice.remove_item(line - 1).map(|_| ())
        })
    }

    /// Replace all line items at once
    pub fn set_items(&self, id: InvoiceId, items: Vec<LineItem>) -> BillingResult<Invoice> {
        self.modify(id, "replaced line items", |invoice| {
            invoice.replace_items(items)
        })
    }

    /// Change the tax rate
    pub fn set_tax_rate(&self, id: InvoiceId, tax_rate: TaxRate) -> BillingResult<Invoice> {
        self.modify(id, "changed tax rate", |invoice| {
            invoice.set_tax_rate(tax_rate)
        })
    }

    /// Change the status
    pub fn set_status(&self, id: InvoiceId, status: InvoiceStatus) -> BillingResult<Invoice> {
        self.modify(id, "changed invoice status", |invoice| {
            invoice.set_status(status);
            Ok(())
        })
    }

    /// Replace the free-text notes; blank notes are cleared
    pub fn set_notes(&self, id: InvoiceId, notes: Option<String>) -> BillingResult<Invoice> {
        self.modify(id, "changed invoice notes", |invoice| {
            invoice.notes = notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
            Ok(())
        })
    }

    /// Load, edit and persist one invoice; nothing is written if the edit fails
    fn modify<F>(&self, id: InvoiceId, action: &str, edit: F) -> BillingResult<Invoice>
    where
        F: FnOnce(&mut Invoice) -> BillingResult<()>,
    {
        let mut invoice = self.storage.invoices.get_required(id)?;
        edit(&mut invoice)?;

        self.storage.invoices.upsert(invoice.clone())?;
        self.storage.invoices.save()?;

        info!(
            invoice = %invoice.id,
            number = %invoice.invoice_number,
            total = %invoice.total(),
            "{}",
            action
        );
        Ok(invoice)
    }
}
