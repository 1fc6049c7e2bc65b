//! Expense model
//!
//! Expenses are standalone outflows, independent of any client. They carry
//! no status: an expense is realized on its date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{DocumentId, ExpenseId};
use super::money::Money;
use crate::error::{BillingError, BillingResult};

/// A business expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Date the expense was incurred
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Attached receipt, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(amount: Money, date: NaiveDate) -> BillingResult<Self> {
        if amount.is_negative() {
            return Err(BillingError::InvalidAmount(format!(
                "expense amount {} must not be negative",
                amount
            )));
        }

        Ok(Self {
            id: ExpenseId::new(),
            amount,
            description: None,
            date,
            category: None,
            document_id: None,
            created_at: Utc::now(),
        })
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Category label, trimmed; blank labels count as uncategorized
    pub fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description.as_deref().unwrap_or("(no description)"),
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut expense = Expense::new(Money::from_cents(4200), date).unwrap();
        expense.description = Some("Printer ink".into());
        assert_eq!(expense.to_string(), "2025-01-15 Printer ink 42.00");
    }

    #[test]
    fn test_negative_rejected() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert!(matches!(
            Expense::new(Money::from_cents(-1), date),
            Err(BillingError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_blank_category_is_uncategorized() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut expense = Expense::new(Money::zero(), date).unwrap();
        expense.category = Some("  ".into());
        assert_eq!(expense.category_label(), None);
        expense.category = Some(" Travel ".into());
        assert_eq!(expense.category_label(), Some("Travel"));
    }
}
