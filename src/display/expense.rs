//! Expense and document display formatting

use std::collections::HashMap;

use super::truncate;
use crate::error::BillingResult;
use crate::models::{ClientId, Document, Expense, Money};

/// Format expenses as a table with a total row
pub fn format_expense_list(
    expenses: &[Expense],
    currency: &str,
    date_format: &str,
) -> BillingResult<String> {
    if expenses.is_empty() {
        return Ok("No expenses found.\n".to_string());
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<16}  {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {}  {:>12}  {}\n",
            expense.id.to_string(),
            expense.date.format(date_format).to_string(),
            truncate(expense.category_label().unwrap_or("-"), 16),
            expense.amount().format_with_symbol(currency),
            expense.description.as_deref().unwrap_or("")
        ));
    }

    let total = Money::try_sum(expenses.iter().map(|e| e.amount()))?;
    output.push_str(&"-".repeat(80));
    output.push('\n');
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<16}  {:>12}\n",
        "TOTAL",
        "",
        "",
        total.format_with_symbol(currency)
    ));

    Ok(output)
}

/// Format document metadata as a table
pub fn format_document_list(
    documents: &[Document],
    client_names: &HashMap<ClientId, String>,
) -> String {
    if documents.is_empty() {
        return "No documents found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<30}  {:<20}  {:>10}  {}\n",
        "ID", "Name", "Client", "Size", "Uploaded"
    ));
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for doc in documents {
        let client = match doc.client_id {
            Some(id) => client_names
                .get(&id)
                .map(String::as_str)
                .unwrap_or("(unknown)"),
            None => "-",
        };
        output.push_str(&format!(
            "{:<12}  {}  {}  {:>10}  {}\n",
            doc.id.to_string(),
            truncate(&doc.name, 30),
            truncate(client, 20),
            format_size(doc.size),
            doc.uploaded_at.format("%Y-%m-%d")
        ));
    }

    output
}

/// Human-readable byte count
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}
