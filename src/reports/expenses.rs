//! Expense Summary Report
//!
//! Expenses grouped by category over an optional date range.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Write;

use crate::billing::dashboard::expense_total;
use crate::error::BillingResult;
use crate::models::{Expense, Money};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Label shown for expenses without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Expenses in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// `None` is the uncategorized bucket
    pub category: Option<String>,
    pub total: Money,
    pub count: usize,
    /// Share of the report total
    pub percentage: f64,
}

impl CategoryTotal {
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// Expense Summary Report
#[derive(Debug, Clone)]
pub struct ExpenseSummaryReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Largest first; the uncategorized bucket is always last
    pub categories: Vec<CategoryTotal>,
    pub total: Money,
    pub count: usize,
}

impl ExpenseSummaryReport {
    /// Generate the report from storage
    pub fn generate(
        storage: &Storage,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BillingResult<Self> {
        let expenses = ExpenseService::new(storage).list_in_range(start_date, end_date)?;
        Self::from_expenses(&expenses, start_date, end_date)
    }

    /// Build the report from expenses already filtered to the range
    pub fn from_expenses(
        expenses: &[Expense],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BillingResult<Self> {
        let total = expense_total(expenses)?;

        let mut named: HashMap<&str, (Money, usize)> = HashMap::new();
        let mut uncategorized = (Money::zero(), 0usize);
        for expense in expenses {
            let entry = match expense.category_label() {
                Some(label) => named.entry(label).or_insert((Money::zero(), 0)),
                None => &mut uncategorized,
            };
            entry.0 = entry.0.checked_add(expense.amount())?;
            entry.1 += 1;
        }

        let share = |amount: Money| {
            if total.is_zero() {
                0.0
            } else {
                (amount.cents() as f64 / total.cents() as f64) * 100.0
            }
        };

        let mut categories: Vec<CategoryTotal> = named
            .into_iter()
            .map(|(label, (amount, count))| CategoryTotal {
                category: Some(label.to_string()),
                total: amount,
                count,
                percentage: share(amount),
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        if uncategorized.1 > 0 {
            categories.push(CategoryTotal {
                category: None,
                total: uncategorized.0,
                count: uncategorized.1,
                percentage: share(uncategorized.0),
            });
        }

        Ok(Self {
            start_date,
            end_date,
            categories,
            total,
            count: expenses.len(),
        })
    }

    fn range_label(&self) -> String {
        match (self.start_date, self.end_date) {
            (Some(s), Some(e)) => format!("{} to {}", s, e),
            (Some(s), None) => format!("since {}", s),
            (None, Some(e)) => format!("through {}", e),
            (None, None) => "all time".to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Expense Summary: {}\n", self.range_label()));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for category in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>14} {:>8} {:>7.1}%\n",
                category.label(),
                category.total.format_with_symbol(currency),
                category.count,
                category.percentage
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14} {:>8}\n",
            "TOTAL",
            self.total.format_with_symbol(currency),
            self.count
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> BillingResult<()> {
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        let start = self.start_date.map(|d| d.to_string()).unwrap_or_default();
        let end = self.end_date.map(|d| d.to_string()).unwrap_or_default();

        csv.write_record(["Start Date", "End Date", "Category", "Amount", "Count", "Percentage"])?;
        for category in &self.categories {
            csv.write_record([
                start.as_str(),
                end.as_str(),
                category.label(),
                category.total.to_string().as_str(),
                category.count.to_string().as_str(),
                format!("{:.2}", category.percentage).as_str(),
            ])?;
        }
        csv.write_record([
            start.as_str(),
            end.as_str(),
            "TOTAL",
            self.total.to_string().as_str(),
            self.count.to_string().as_str(),
            if self.total.is_zero() { "0.00" } else { "100.00" },
        ])?;

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(cents: i64, category: Option<&str>) -> Expense {
        let mut expense = Expense::new(Money::from_cents(cents), day(2024, 3, 1)).unwrap();
        expense.category = category.map(String::from);
        expense
    }

    #[test]
    fn test_grouping_puts_uncategorized_last() {
        let expenses = vec![
            expense(1000, None),
            expense(2000, Some("Travel")),
            expense(5000, Some("Software")),
            expense(500, Some("  ")),
            expense(1500, Some("Travel")),
        ];

        let report = ExpenseSummaryReport::from_expenses(&expenses, None, None).unwrap();
        let labels: Vec<&str> = report.categories.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Software", "Travel", UNCATEGORIZED]);

        let travel = &report.categories[1];
        assert_eq!(travel.total, Money::from_cents(3500));
        assert_eq!(travel.count, 2);
        assert_eq!(report.categories[2].total, Money::from_cents(1500));
        assert_eq!(report.total, Money::from_cents(10000));
        assert!((travel.percentage - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report() {
        let report = ExpenseSummaryReport::from_expenses(&[], None, None).unwrap();
        assert!(report.categories.is_empty());
        assert!(report.format_terminal("$").contains("No expenses found."));
    }

    #[test]
    fn test_csv_export() {
        let expenses = vec![expense(2000, Some("Travel"))];
        let report =
            ExpenseSummaryReport::from_expenses(&expenses, Some(day(2024, 3, 1)), None).unwrap();

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();

        assert!(csv.contains("2024-03-01,,Travel,20.00,1,100.00\n"));
        assert!(csv.contains("2024-03-01,,TOTAL,20.00,1,100.00\n"));
    }
}
