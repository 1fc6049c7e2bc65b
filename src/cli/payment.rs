//! Payment CLI commands

use clap::Subcommand;

use super::{client_names, parse_date, parse_optional_date, today};
use crate::billing::classifier;
use crate::config::settings::Settings;
use crate::display::format_payment_list;
use crate::error::BillingResult;
use crate::models::{Frequency, PaymentStatus, Recurrence};
use crate::services::{ClientService, DocumentService, NewPayment, PaymentService};
use crate::storage::Storage;

/// Payment subcommands
#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record a payment owed by a client
    Add {
        /// Client name or ID
        client: String,
        /// Amount (e.g., "150.00")
        amount: String,
        /// Initial status (pending, overdue, paid)
        #[arg(short, long, default_value = "pending")]
        status: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Repeat every weekly, biweekly, monthly, quarterly or yearly
        #[arg(long)]
        recurring: Option<String>,
        /// Last date of the recurrence (YYYY-MM-DD)
        #[arg(long, requires = "recurring")]
        until: Option<String>,
        /// ID of an uploaded invoice document
        #[arg(long)]
        invoice_doc: Option<String>,
    },
    /// List payments
    List {
        /// Only this client's payments
        #[arg(short, long)]
        client: Option<String>,
        /// Only payments in this status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Change a payment's status
    Status {
        /// Payment ID
        payment: String,
        /// New status (pending, overdue, paid)
        status: String,
        /// Date of the change, used as the paid date (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a payment
    Delete {
        /// Payment ID
        payment: String,
    },
}

/// Handle a payment command
pub fn handle_payment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PaymentCommands,
) -> BillingResult<()> {
    let service = PaymentService::new(storage);
    let clients = ClientService::new(storage);

    match cmd {
        PaymentCommands::Add {
            client,
            amount,
            status,
            due,
            description,
            recurring,
            until,
            invoice_doc,
        } => {
            let client = clients.resolve(&client)?;
            let (status, amount) = classifier::classify(&status, &amount)?;

            let recurrence = match recurring {
                Some(freq) => {
                    let frequency: Frequency = freq.parse()?;
                    Some(Recurrence::every(
                        frequency,
                        parse_optional_date(until.as_deref())?,
                    ))
                }
                None => None,
            };

            let invoice_document_id = match invoice_doc {
                Some(doc) => Some(DocumentService::new(storage).resolve(&doc)?.id),
                None => None,
            };

            let payment = service.create(
                NewPayment {
                    client_id: client.id,
                    amount,
                    status,
                    description,
                    due_date: parse_optional_date(due.as_deref())?,
                    recurrence,
                    invoice_document_id,
                },
                today(),
            )?;

            println!(
                "Recorded payment of {} for {} ({})",
                payment.amount().format_with_symbol(&settings.currency_symbol),
                client.name,
                payment.status()
            );
            println!("  ID: {}", payment.id);
        }

        PaymentCommands::List { client, status } => {
            let status = status
                .map(|s| s.parse::<PaymentStatus>())
                .transpose()?;
            let payments = match (client, status) {
                (Some(client), status) => {
                    let client = clients.resolve(&client)?;
                    let mut payments = service.list_for_client(client.id)?;
                    if let Some(status) = status {
                        payments.retain(|p| p.status() == status);
                    }
                    payments
                }
                (None, Some(status)) => service.list_by_status(status)?,
                (None, None) => service.list()?,
            };

            print!(
                "{}",
                format_payment_list(
                    &payments,
                    &client_names(storage)?,
                    &settings.currency_symbol,
                    &settings.date_format
                )?
            );
        }

        PaymentCommands::Status {
            payment,
            status,
            date,
        } => {
            let found = service.resolve(&payment)?;
            let status: PaymentStatus = status.parse()?;
            let on = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };

            let updated = service.set_status(found.id, status, on)?;
            match updated.paid_date() {
                Some(paid) => println!("Payment {} is {} (paid {})", updated.id, updated.status(), paid),
                None => println!("Payment {} is {}", updated.id, updated.status()),
            }
        }

        PaymentCommands::Delete { payment } => {
            let found = service.resolve(&payment)?;
            service.delete(found.id)?;
            println!(
                "Deleted payment {} ({})",
                found.id,
                found.amount().format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}

