//! Storage layer for billtrack
//!
//! Local JSON files standing in for the persistence service the billing
//! engine reads from. One base directory is one account.

pub mod file_io;
pub mod init;
pub mod repository;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use repository::{JsonRepository, Record};

use tracing::{info, warn};

use crate::billing::AccountSnapshot;
use crate::config::paths::BilltrackPaths;
use crate::error::BillingError;
use crate::models::{Client, ClientId, Document, Expense, Invoice, Payment};

pub type ClientRepository = JsonRepository<Client>;
pub type PaymentRepository = JsonRepository<Payment>;
pub type InvoiceRepository = JsonRepository<Invoice>;
pub type ExpenseRepository = JsonRepository<Expense>;
pub type DocumentRepository = JsonRepository<Document>;

/// What was removed along with a client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub payments: usize,
    pub invoices: usize,
    pub documents: usize,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BilltrackPaths,
    pub clients: ClientRepository,
    pub payments: PaymentRepository,
    pub invoices: InvoiceRepository,
    pub expenses: ExpenseRepository,
    pub documents: DocumentRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BilltrackPaths) -> Result<Self, BillingError> {
        paths.ensure_directories()?;

        Ok(Self {
            clients: JsonRepository::new(paths.clients_file()),
            payments: JsonRepository::new(paths.payments_file()),
            invoices: JsonRepository::new(paths.invoices_file()),
            expenses: JsonRepository::new(paths.expenses_file()),
            documents: JsonRepository::new(paths.documents_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &BilltrackPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BillingError> {
        self.clients.load()?;
        self.payments.load()?;
        for payment in self.payments.get_all()? {
            if let Err(e) = payment.check_consistency() {
                warn!(payment = %payment.id, error = %e, "inconsistent payment on disk");
            }
        }
        self.invoices.load()?;
        self.expenses.load()?;
        self.documents.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BillingError> {
        self.clients.save()?;
        self.payments.save()?;
        self.invoices.save()?;
        self.expenses.save()?;
        self.documents.save()?;
        Ok(())
    }

    /// Read every collection into one owned snapshot
    pub fn snapshot(&self) -> Result<AccountSnapshot, BillingError> {
        Ok(AccountSnapshot {
            clients: self.clients.get_all()?,
            payments: self.payments.get_all()?,
            invoices: self.invoices.get_all()?,
            expenses: self.expenses.get_all()?,
            documents: self.documents.get_all()?,
        })
    }

    /// Delete a client together with its payments, invoices and documents,
    /// and persist the affected files
    pub fn delete_client_cascade(&self, client_id: ClientId) -> Result<CascadeReport, BillingError> {
        if !self.clients.delete(client_id)? {
            return Err(BillingError::client_not_found(client_id.to_string()));
        }

        let report = CascadeReport {
            payments: self.payments.delete_where(|p| p.client_id == client_id)?,
            invoices: self.invoices.delete_where(|i| i.client_id == client_id)?,
            documents: self
                .documents
                .delete_where(|d| d.client_id == Some(client_id))?,
        };

        self.clients.save()?;
        self.payments.save()?;
        self.invoices.save()?;
        self.documents.save()?;

        info!(
            client = %client_id,
            payments = report.payments,
            invoices = report.invoices,
            documents = report.documents,
            "deleted client with dependents"
        );
        Ok(report)
    }
}
