//! Payment service
//!
//! Records payments against clients and moves them through the
//! pending / overdue / paid lifecycle.

use chrono::NaiveDate;
use tracing::info;

use crate::billing::ledger::{self, LedgerSummary};
use crate::error::{BillingError, BillingResult};
use crate::models::{ClientId, DocumentId, Money, Payment, PaymentId, PaymentStatus, Recurrence};
use crate::storage::Storage;

/// Input for a new payment
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub client_id: ClientId,
    pub amount: Money,
    pub status: PaymentStatus,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub recurrence: Option<Recurrence>,
    pub invoice_document_id: Option<DocumentId>,
}

impl NewPayment {
    /// A pending payment with no optional fields
    pub fn pending(client_id: ClientId, amount: Money) -> Self {
        Self {
            client_id,
            amount,
            status: PaymentStatus::Pending,
            description: None,
            due_date: None,
            recurrence: None,
            invoice_document_id: None,
        }
    }
}

/// Service for payment management
pub struct PaymentService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentService<'a> {
    /// Create a new payment service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payment; `today` is the paid date if it starts out paid
    pub fn create(&self, input: NewPayment, today: NaiveDate) -> BillingResult<Payment> {
        if !self.storage.clients.exists(input.client_id)? {
            return Err(BillingError::client_not_found(input.client_id.to_string()));
        }
        if let Some(doc_id) = input.invoice_document_id {
            if !self.storage.documents.exists(doc_id)? {
                return Err(BillingError::document_not_found(doc_id.to_string()));
            }
        }

        let mut payment = Payment::with_status(input.client_id, input.amount, input.status, today)?;
        payment.description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        payment.due_date = input.due_date;
        payment.recurrence = input.recurrence;
        payment.invoice_document_id = input.invoice_document_id;

        self.storage.payments.upsert(payment.clone())?;
        self.storage.payments.save()?;

        info!(
            payment = %payment.id,
            client = %payment.client_id,
            amount = %payment.amount(),
            status = payment.status().as_str(),
            "recorded payment"
        );
        Ok(payment)
    }

    pub fn get(&self, id: PaymentId) -> BillingResult<Option<Payment>> {
        self.storage.payments.get(id)
    }

    /// Find a payment by full or short ID
    pub fn resolve(&self, identifier: &str) -> BillingResult<Payment> {
        self.storage
            .payments
            .find_by_short_id(identifier)?
            .ok_or_else(|| BillingError::payment_not_found(identifier))
    }

    /// All payments, oldest first
    pub fn list(&self) -> BillingResult<Vec<Payment>> {
        self.storage.payments.get_all()
    }

    /// Payments owned by one client
    pub fn list_for_client(&self, client_id: ClientId) -> BillingResult<Vec<Payment>> {
        self.storage.payments.filter(|p| p.client_id == client_id)
    }

    /// Payments in one status
    pub fn list_by_status(&self, status: PaymentStatus) -> BillingResult<Vec<Payment>> {
        self.storage.payments.filter(|p| p.status() == status)
    }

    /// Move a payment to a new status as of `on`
    pub fn set_status(
        &self,
        id: PaymentId,
        status: PaymentStatus,
        on: NaiveDate,
    ) -> BillingResult<Payment> {
        let mut payment = self.storage.payments.get_required(id)?;
        let previous = payment.status();
        payment.set_status(status, on);

        self.storage.payments.upsert(payment.clone())?;
        self.storage.payments.save()?;

        info!(
            payment = %payment.id,
            from = previous.as_str(),
            to = status.as_str(),
            "changed payment status"
        );
        Ok(payment)
    }

    /// Delete a payment
    pub fn delete(&self, id: PaymentId) -> BillingResult<()> {
        if !self.storage.payments.delete(id)? {
            return Err(BillingError::payment_not_found(id.to_string()));
        }
        self.storage.payments.save()?;

        info!(payment = %id, "deleted payment");
        Ok(())
    }

    /// Paid and outstanding totals, for one client or the whole account
    pub fn summary(&self, client_id: Option<ClientId>) -> BillingResult<LedgerSummary> {
        let payments = self.list()?;
        match client_id {
            Some(client_id) => ledger::summarize(ledger::for_client(&payments, client_id)),
            None => ledger::summarize(&payments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BilltrackPaths;
    use crate::models::Client;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (TempDir, Storage, Client) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let client = Client::new("Acme");
        storage.clients.upsert(client.clone()).unwrap();
        (temp_dir, storage, client)
    }

    #[test]
    fn test_create_requires_existing_client() {
        let (_temp_dir, storage, _client) = setup();
        let service = PaymentService::new(&storage);

        let err = service
            .create(
                NewPayment::pending(ClientId::new(), Money::from_cents(100)),
                day(2024, 3, 1),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_paid_stamps_today() {
        let (_temp_dir, storage, client) = setup();
        let service = PaymentService::new(&storage);

        let mut input = NewPayment::pending(client.id, Money::from_cents(10000));
        input.status = PaymentStatus::Paid;
        let payment = service.create(input, day(2024, 3, 10)).unwrap();

        assert_eq!(payment.paid_date(), Some(day(2024, 3, 10)));
    }

    #[test]
    fn test_status_round_trip() {
        let (_temp_dir, storage, client) = setup();
        let service = PaymentService::new(&storage);
        let payment = service
            .create(
                NewPayment::pending(client.id, Money::from_cents(5000)),
                day(2024, 3, 1),
            )
            .unwrap();

        let paid = service
            .set_status(payment.id, PaymentStatus::Paid, day(2024, 3, 10))
            .unwrap();
        assert_eq!(paid.paid_date(), Some(day(2024, 3, 10)));

        let again = service
            .set_status(payment.id, PaymentStatus::Paid, day(2024, 4, 1))
            .unwrap();
        assert_eq!(again.paid_date(), Some(day(2024, 3, 10)));

        let reverted = service
            .set_status(payment.id, PaymentStatus::Pending, day(2024, 4, 2))
            .unwrap();
        assert!(reverted.paid_date().is_none());
    }

    #[test]
    fn test_summary_scenario() {
        let (_temp_dir, storage, client) = setup();
        let other = Client::new("Other");
        storage.clients.upsert(other.clone()).unwrap();
        let service = PaymentService::new(&storage);

        for (cents, status) in [
            (10000, PaymentStatus::Paid),
            (5000, PaymentStatus::Pending),
            (2500, PaymentStatus::Overdue),
        ] {
            let mut input = NewPayment::pending(client.id, Money::from_cents(cents));
            input.status = status;
            service.create(input, day(2024, 3, 10)).unwrap();
        }
        service
            .create(
                NewPayment::pending(other.id, Money::from_cents(999)),
                day(2024, 3, 10),
            )
            .unwrap();

        let summary = service.summary(Some(client.id)).unwrap();
        assert_eq!(summary.paid_total, Money::from_cents(10000));
        assert_eq!(summary.outstanding_total, Money::from_cents(7500));

        let all = service.summary(None).unwrap();
        assert_eq!(all.outstanding_total, Money::from_cents(8499));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage, client) = setup();
        let service = PaymentService::new(&storage);
        let payment = service
            .create(
                NewPayment::pending(client.id, Money::from_cents(100)),
                day(2024, 3, 1),
            )
            .unwrap();

        service.delete(payment.id).unwrap();
        assert!(service.get(payment.id).unwrap().is_none());
        assert!(service.delete(payment.id).unwrap_err().is_not_found());
    }
}
