//! Expense service

use chrono::NaiveDate;
use tracing::info;

use crate::error::{BillingError, BillingResult};
use crate::models::{DocumentId, Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense tracking
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense
    pub fn create(
        &self,
        amount: Money,
        date: NaiveDate,
        description: Option<String>,
        category: Option<String>,
        document_id: Option<DocumentId>,
    ) -> BillingResult<Expense> {
        if let Some(doc_id) = document_id {
            if !self.storage.documents.exists(doc_id)? {
                return Err(BillingError::document_not_found(doc_id.to_string()));
            }
        }

        let mut expense = Expense::new(amount, date)?;
        expense.description = description.filter(|d| !d.trim().is_empty());
        expense.category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        expense.document_id = document_id;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        info!(expense = %expense.id, amount = %expense.amount(), %date, "recorded expense");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> BillingResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// All expenses, ordered by date
    pub fn list(&self) -> BillingResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_all()?;
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(expenses)
    }

    /// Expenses dated within `[start, end]`; open bounds are unbounded
    pub fn list_in_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BillingResult<Vec<Expense>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| start.map_or(true, |s| e.date >= s))
            .filter(|e| end.map_or(true, |en| e.date <= en))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BilltrackPaths;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_and_range() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        service
            .create(Money::from_cents(4000), day(2024, 3, 5), None, Some(" Software ".into()), None)
            .unwrap();
        service
            .create(Money::from_cents(1500), day(2024, 1, 20), None, None, None)
            .unwrap();

        let all = service.list().unwrap();
        assert_eq!(all[0].date, day(2024, 1, 20));
        assert_eq!(all[1].category.as_deref(), Some("Software"));

        let march = service
            .list_in_range(Some(day(2024, 3, 1)), Some(day(2024, 3, 31)))
            .unwrap();
        assert_eq!(march.len(), 1);
    }

    #[test]
    fn test_negative_and_unknown_document_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        assert!(matches!(
            service.create(Money::from_cents(-1), day(2024, 1, 1), None, None, None),
            Err(BillingError::InvalidAmount(_))
        ));
        assert!(service
            .create(
                Money::from_cents(1),
                day(2024, 1, 1),
                None,
                None,
                Some(DocumentId::new())
            )
            .unwrap_err()
            .is_not_found());
    }
}
