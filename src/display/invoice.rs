//! Invoice display formatting
//!
//! List view plus the detail view with line items and derived totals.

use std::collections::HashMap;

use super::truncate;
use crate::models::{ClientId, Invoice};

/// Format invoices as a table
pub fn format_invoice_list(
    invoices: &[Invoice],
    client_names: &HashMap<ClientId, String>,
    currency: &str,
    date_format: &str,
) -> String {
    if invoices.is_empty() {
        return "No invoices found.\n".to_string();
    }

    let number_width = invoices
        .iter()
        .map(|i| i.invoice_number.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<number_width$}  {:<20}  {:<10}  {:<10}  {:>14}  {}\n",
        "Number",
        "Client",
        "Issued",
        "Due",
        "Total",
        "Status",
        number_width = number_width,
    ));
    output.push_str(&format!(
        "{:-<number_width$}  {:-<20}  {:-<10}  {:-<10}  {:->14}  {:-<9}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        number_width = number_width,
    ));

    for invoice in invoices {
        let client = client_names
            .get(&invoice.client_id)
            .map(String::as_str)
            .unwrap_or("(unknown)");
        output.push_str(&format!(
            "{:<number_width$}  {}  {:<10}  {:<10}  {:>14}  {}\n",
            invoice.invoice_number,
            truncate(client, 20),
            invoice.issue_date.format(date_format).to_string(),
            invoice.due_date.format(date_format).to_string(),
            invoice.total().format_with_symbol(currency),
            invoice.status,
            number_width = number_width,
        ));
    }

    output
}

/// Format one invoice with its line items and totals
pub fn format_invoice_details(
    invoice: &Invoice,
    client_name: &str,
    currency: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice #{}\n", invoice.invoice_number));
    output.push_str(&format!("  ID:      {}\n", invoice.id));
    output.push_str(&format!("  Client:  {}\n", client_name));
    output.push_str(&format!("  Status:  {}\n", invoice.status));
    output.push_str(&format!(
        "  Issued:  {}\n",
        invoice.issue_date.format(date_format)
    ));
    output.push_str(&format!(
        "  Due:     {}\n",
        invoice.due_date.format(date_format)
    ));
    output.push('\n');

    if invoice.items().is_empty() {
        output.push_str("  (no line items)\n");
    } else {
        output.push_str(&format!(
            "  {:>3}  {:<30}  {:>8}  {:>12}  {:>14}\n",
            "#", "Description", "Qty", "Unit Price", "Amount"
        ));
        output.push_str(&format!("  {}\n", "-".repeat(75)));
        for (n, item) in invoice.items().iter().enumerate() {
            output.push_str(&format!(
                "  {:>3}  {}  {:>8}  {:>12}  {:>14}\n",
                n + 1,
                truncate(&item.description, 30),
                item.quantity(),
                item.unit_price().format_with_symbol(currency),
                item.amount().format_with_symbol(currency)
            ));
        }
    }

    output.push_str(&format!("  {}\n", "-".repeat(75)));
    output.push_str(&format!(
        "  {:>59}  {:>14}\n",
        "Subtotal",
        invoice.subtotal().format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  {:>59}  {:>14}\n",
        format!("Tax ({})", invoice.tax_rate()),
        invoice.tax_amount().format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  {:>59}  {:>14}\n",
        "Total",
        invoice.total().format_with_symbol(currency)
    ));

    if let Some(notes) = &invoice.notes {
        output.push('\n');
        output.push_str(&format!("  Notes: {}\n", notes));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Money, Quantity, TaxRate};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_invoice() -> Invoice {
        let mut invoice = Invoice::new(
            ClientId::new(),
            "INV-0007",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .unwrap();
        invoice
            .replace_items(vec![
                LineItem::new("Design", Quantity::whole(2).unwrap(), Money::from_cents(1000)).unwrap(),
                LineItem::new("Hosting", Quantity::new(dec!(1.5)).unwrap(), Money::from_cents(500)).unwrap(),
            ])
            .unwrap();
        invoice.set_tax_rate(TaxRate::new(dec!(10)).unwrap()).unwrap();
        invoice
    }

    #[test]
    fn test_details_show_items_and_totals() {
        let output = format_invoice_details(&sample_invoice(), "Acme", "$", "%Y-%m-%d");

        assert!(output.contains("Invoice #INV-0007"));
        assert!(output.contains("Design"));
        assert!(output.contains("1.5"));
        assert!(output.contains("$7.50"));
        assert!(output.contains("$27.50"));
        assert!(output.contains("$2.75"));
        assert!(output.contains("$30.25"));
        assert!(output.contains("Tax (10%)"));
    }

    #[test]
    fn test_list() {
        let invoice = sample_invoice();
        let names = HashMap::from([(invoice.client_id, "Acme".to_string())]);
        let output = format_invoice_list(&[invoice], &names, "$", "%Y-%m-%d");
        assert!(output.contains("INV-0007"));
        assert!(output.contains("Draft"));
        assert!(output.contains("$30.25"));
    }
}
