//! Invoice CLI commands

use clap::Subcommand;

use super::{client_names, parse_date, parse_optional_date, today};
use crate::config::settings::Settings;
use crate::display::{format_invoice_details, format_invoice_list};
use crate::error::{BillingError, BillingResult};
use crate::models::{InvoiceStatus, LineItem, Money, Quantity, TaxRate};
use crate::services::{ClientService, InvoiceService};
use crate::storage::Storage;

/// Invoice subcommands
#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Create an empty draft invoice
    Create {
        /// Client name or ID
        client: String,
        /// Invoice number (default: next INV-NNNN)
        #[arg(short, long)]
        number: Option<String>,
        /// Issue date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        issued: Option<String>,
        /// Due date (YYYY-MM-DD, default: issue date plus payment terms)
        #[arg(short, long)]
        due: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Append a line item
    AddItem {
        /// Invoice number or ID
        invoice: String,
        description: String,
        /// Quantity (e.g., "2" or "1.5")
        quantity: String,
        /// Unit price (e.g., "120.00")
        price: String,
    },
    /// Remove a line item by its position
    RemoveItem {
        /// Invoice number or ID
        invoice: String,
        /// Line number as shown by `invoice show`
        line: usize,
    },
    /// Replace every line item at once
    SetItems {
        /// Invoice number or ID
        invoice: String,
        /// Line item as "description:quantity:price"; repeat for more lines
        #[arg(short, long = "item")]
        items: Vec<String>,
    },
    /// Set the tax rate in percent
    Tax {
        /// Invoice number or ID
        invoice: String,
        /// Rate in percent (e.g., "8.25")
        rate: String,
    },
    /// Change the invoice status (draft, sent, paid, cancelled)
    Status {
        /// Invoice number or ID
        invoice: String,
        status: String,
    },
    /// Show an invoice with its line items and totals
    Show {
        /// Invoice number or ID
        invoice: String,
    },
    /// List invoices
    List {
        /// Only this client's invoices
        #[arg(short, long)]
        client: Option<String>,
    },
}

/// Parse a "description:quantity:price" line item
///
/// Splits from the right, so the description may itself contain colons.
pub fn parse_line_item(input: &str) -> BillingResult<LineItem> {
    let mut parts = input.rsplitn(3, ':');
    let (price, quantity, description) = match (parts.next(), parts.next(), parts.next()) {
        (Some(p), Some(q), Some(d)) => (p, q, d),
        _ => {
            return Err(BillingError::Validation(format!(
                "Invalid line item '{}'. Use description:quantity:price",
                input
            )))
        }
    };

    build_line_item(description, quantity, price)
}

fn build_line_item(description: &str, quantity: &str, price: &str) -> BillingResult<LineItem> {
    let quantity = Quantity::parse(quantity)?;
    let unit_price = Money::parse(price)
        .map_err(|e| BillingError::InvalidPrice(format!("'{}': {}", price, e)))?;
    if unit_price.is_negative() {
        return Err(BillingError::InvalidPrice(format!(
            "{} must not be negative",
            unit_price
        )));
    }
    LineItem::new(description.trim(), quantity, unit_price)
}

/// Handle an invoice command
pub fn handle_invoice_command(
    storage: &Storage,
    settings: &Settings,
    cmd: InvoiceCommands,
) -> BillingResult<()> {
    let service = InvoiceService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        InvoiceCommands::Create {
            client,
            number,
            issued,
            due,
            notes,
        } => {
            let client = ClientService::new(storage).resolve(&client)?;
            let number = match number {
                Some(n) => n,
                None => service.next_invoice_number()?,
            };
            let issue_date = match issued {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let due_date = parse_optional_date(due.as_deref())?;

            let mut invoice = service.create(client.id, &number, issue_date, due_date, settings)?;
            if notes.is_some() {
                invoice = service.set_notes(invoice.id, notes)?;
            }

            println!(
                "Created invoice #{} for {} (due {}, tax {})",
                invoice.invoice_number,
                client.name,
                invoice.due_date,
                invoice.tax_rate()
            );
            println!("  ID: {}", invoice.id);
        }

        InvoiceCommands::AddItem {
            invoice,
            description,
            quantity,
            price,
        } => {
            let found = service.resolve(&invoice)?;
            let item = build_line_item(&description, &quantity, &price)?;
            let updated = service.add_item(found.id, item)?;
            println!(
                "Added line {} to #{}; total now {}",
                updated.items().len(),
                updated.invoice_number,
                updated.total().format_with_symbol(currency)
            );
        }

        InvoiceCommands::RemoveItem { invoice, line } => {
            let found = service.resolve(&invoice)?;
            let updated = service.remove_item(found.id, line)?;
            println!(
                "Removed line {} from #{}; total now {}",
                line,
                updated.invoice_number,
                updated.total().format_with_symbol(currency)
            );
        }

        InvoiceCommands::SetItems { invoice, items } => {
            let found = service.resolve(&invoice)?;
            let items = items
                .iter()
                .map(|s| parse_line_item(s))
                .collect::<BillingResult<Vec<_>>>()?;
            let updated = service.set_items(found.id, items)?;
            println!(
                "Set {} line(s) on #{}; total now {}",
                updated.items().len(),
                updated.invoice_number,
                updated.total().format_with_symbol(currency)
            );
        }

        InvoiceCommands::Tax { invoice, rate } => {
            let found = service.resolve(&invoice)?;
            let updated = service.set_tax_rate(found.id, TaxRate::parse(&rate)?)?;
            println!(
                "Tax on #{} set to {}: {} tax, {} total",
                updated.invoice_number,
                updated.tax_rate(),
                updated.tax_amount().format_with_symbol(currency),
                updated.total().format_with_symbol(currency)
            );
        }

        InvoiceCommands::Status { invoice, status } => {
            let found = service.resolve(&invoice)?;
            let status: InvoiceStatus = status.parse()?;
            let updated = service.set_status(found.id, status)?;
            println!("Invoice #{} is {}", updated.invoice_number, updated.status);
        }

        InvoiceCommands::Show { invoice } => {
            let found = service.resolve(&invoice)?;
            let client_name = storage
                .clients
                .get(found.client_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| "(unknown)".to_string());
            print!(
                "{}",
                format_invoice_details(&found, &client_name, currency, &settings.date_format)
            );
        }

        InvoiceCommands::List { client } => {
            let invoices = match client {
                Some(client) => {
                    let client = ClientService::new(storage).resolve(&client)?;
                    service.list_for_client(client.id)?
                }
                None => service.list()?,
            };
            print!(
                "{}",
                format_invoice_list(
                    &invoices,
                    &client_names(storage)?,
                    currency,
                    &settings.date_format
                )
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_item() {
        let item = parse_line_item("Consulting: phase 1:1.5:120.00").unwrap();
        assert_eq!(item.description, "Consulting: phase 1");
        assert_eq!(item.amount(), Money::from_cents(18000));
    }

    #[test]
    fn test_parse_line_item_errors() {
        assert!(parse_line_item("no price").unwrap_err().is_validation());
        assert!(matches!(
            parse_line_item("A:0:10"),
            Err(BillingError::InvalidQuantity(_))
        ));
        assert!(matches!(
            parse_line_item("A:1:-10"),
            Err(BillingError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_line_item("A:1:abc"),
            Err(BillingError::InvalidPrice(_))
        ));
    }
}
