//! Generic JSON-backed repository
//!
//! Each record kind lives in its own JSON file as `{"records": [...]}`. The
//! whole file is loaded into memory, mutated there, and written back
//! atomically on `save`.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::BillingError;
use crate::models::{
    Client, ClientId, Document, DocumentId, Expense, ExpenseId, Invoice, InvoiceId, Payment,
    PaymentId,
};

use super::file_io::{read_json, write_json_atomic};

/// A record that can be stored in a [`JsonRepository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + Display;

    /// Entity name used in errors and logs
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Creation time, used for stable listing order
    fn created_at(&self) -> DateTime<Utc>;

    /// Whether a user-typed short ID refers to this record
    fn matches_short_id(&self, s: &str) -> bool;
}

macro_rules! impl_record {
    ($record:ty, $id:ty, $kind:literal, $created:ident) => {
        impl Record for $record {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.$created
            }

            fn matches_short_id(&self, s: &str) -> bool {
                self.id.matches_short(s)
            }
        }
    };
}

impl_record!(Client, ClientId, "Client", created_at);
impl_record!(Payment, PaymentId, "Payment", created_at);
impl_record!(Invoice, InvoiceId, "Invoice", created_at);
impl_record!(Expense, ExpenseId, "Expense", created_at);
impl_record!(Document, DocumentId, "Document", uploaded_at);

/// On-disk shape of a record file
#[derive(Serialize, Deserialize)]
struct RecordFile<T> {
    #[serde(default = "Vec::new")]
    records: Vec<T>,
}

impl<T> Default for RecordFile<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// Repository for one record kind
pub struct JsonRepository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> JsonRepository<T> {
    /// Create an empty repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<T::Id, T>>, BillingError> {
        self.data
            .read()
            .map_err(|e| BillingError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<T::Id, T>>, BillingError> {
        self.data
            .write()
            .map_err(|e| BillingError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing what is in memory
    pub fn load(&self) -> Result<(), BillingError> {
        let file: RecordFile<T> = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for record in file.records {
            data.insert(record.id(), record);
        }

        debug!(kind = T::KIND, count = data.len(), "loaded records");
        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> Result<(), BillingError> {
        let records = self.get_all()?;
        debug!(kind = T::KIND, count = records.len(), "saving records");
        write_json_atomic(&self.path, &RecordFile { records })
    }

    /// Get a record by ID
    pub fn get(&self, id: T::Id) -> Result<Option<T>, BillingError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Get a record by ID, failing if it does not exist
    pub fn get_required(&self, id: T::Id) -> Result<T, BillingError> {
        self.get(id)?.ok_or_else(|| BillingError::NotFound {
            entity_type: T::KIND,
            identifier: id.to_string(),
        })
    }

    /// All records, oldest first
    pub fn get_all(&self) -> Result<Vec<T>, BillingError> {
        let data = self.read()?;
        let mut records: Vec<_> = data.values().cloned().collect();
        records.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().to_string().cmp(&b.id().to_string()))
        });
        Ok(records)
    }

    /// Records matching a predicate, oldest first
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<T>, BillingError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.get_all()?.into_iter().filter(|r| predicate(r)).collect())
    }

    /// Resolve a user-typed short ID; ambiguous prefixes are an error
    pub fn find_by_short_id(&self, s: &str) -> Result<Option<T>, BillingError> {
        let mut matches = self.filter(|r| r.matches_short_id(s))?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(BillingError::Validation(format!(
                "'{}' matches {} {} records; use more characters",
                s,
                n,
                T::KIND.to_lowercase()
            ))),
        }
    }

    /// Insert or update a record
    pub fn upsert(&self, record: T) -> Result<(), BillingError> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    /// Delete a record, returning whether it existed
    pub fn delete(&self, id: T::Id) -> Result<bool, BillingError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    /// Delete every record matching a predicate, returning how many went
    pub fn delete_where<F>(&self, predicate: F) -> Result<usize, BillingError>
    where
        F: Fn(&T) -> bool,
    {
        let mut data = self.write()?;
        let before = data.len();
        data.retain(|_, record| !predicate(record));
        Ok(before - data.len())
    }

    pub fn exists(&self, id: T::Id) -> Result<bool, BillingError> {
        Ok(self.read()?.contains_key(&id))
    }

    pub fn count(&self) -> Result<usize, BillingError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, JsonRepository<Client>) {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonRepository::new(temp_dir.path().join("clients.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let client = Client::new("Acme");
        let id = client.id;

        repo.upsert(client).unwrap();
        repo.save().unwrap();

        let reloaded: JsonRepository<Client> =
            JsonRepository::new(temp_dir.path().join("clients.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(id).unwrap().unwrap().name, "Acme");
    }

    #[test]
    fn test_get_required_not_found() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo.get_required(ClientId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("Client not found"));
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, repo) = create_test_repo();
        let client = Client::new("Acme");
        repo.upsert(client.clone()).unwrap();

        let found = repo.find_by_short_id(&client.id.to_string()).unwrap();
        assert_eq!(found.map(|c| c.id), Some(client.id));
        assert!(repo.find_by_short_id("cli-zzzzzzzz").unwrap().is_none());
    }

    #[test]
    fn test_delete_where() {
        let temp_dir = TempDir::new().unwrap();
        let repo: JsonRepository<Payment> =
            JsonRepository::new(temp_dir.path().join("payments.json"));
        let a = ClientId::new();
        let b = ClientId::new();
        for client in [a, a, b] {
            repo.upsert(Payment::new(client, Money::from_cents(100)).unwrap())
                .unwrap();
        }

        assert_eq!(repo.delete_where(|p| p.client_id == a).unwrap(), 2);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_invoice_totals_survive_round_trip() {
        use crate::models::{LineItem, Quantity};
        use chrono::NaiveDate;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invoices.json");
        let repo: JsonRepository<Invoice> = JsonRepository::new(path.clone());

        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut invoice = Invoice::new(ClientId::new(), "INV-7", day, day).unwrap();
        invoice
            .replace_items(vec![LineItem::new(
                "Audit",
                Quantity::whole(3).unwrap(),
                Money::from_cents(12_000),
            )
            .unwrap()])
            .unwrap();
        repo.upsert(invoice.clone()).unwrap();
        repo.save().unwrap();

        let reloaded: JsonRepository<Invoice> = JsonRepository::new(path);
        reloaded.load().unwrap();
        let loaded = reloaded.get_required(invoice.id).unwrap();
        assert_eq!(loaded.total(), Money::from_cents(36_000));
    }
}
