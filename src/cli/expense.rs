//! Expense and document CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use super::{client_names, parse_optional_date, today};
use crate::config::settings::Settings;
use crate::display::{format_document_list, format_expense_list};
use crate::error::BillingResult;
use crate::models::Money;
use crate::services::{ClientService, DocumentService, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g., "49.99")
        amount: String,
        /// Date incurred (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// ID of an uploaded receipt document
        #[arg(short, long)]
        receipt: Option<String>,
    },
    /// List expenses
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Only this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Document subcommands
#[derive(Subcommand)]
pub enum DocumentCommands {
    /// Register a file's metadata
    Add {
        /// Path to the file
        path: PathBuf,
        /// Owning client name or ID
        #[arg(short, long)]
        client: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List documents
    List {
        /// Only this client's documents
        #[arg(short, long)]
        client: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BillingResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            date,
            category,
            description,
            receipt,
        } => {
            let amount = Money::parse_non_negative(&amount)?;
            let date = parse_optional_date(date.as_deref())?.unwrap_or_else(today);
            let document_id = match receipt {
                Some(doc) => Some(DocumentService::new(storage).resolve(&doc)?.id),
                None => None,
            };

            let expense = service.create(amount, date, description, category, document_id)?;
            println!(
                "Recorded expense of {} on {}",
                expense.amount().format_with_symbol(&settings.currency_symbol),
                expense.date.format(&settings.date_format)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            start,
            end,
            category,
        } => {
            let mut expenses = service.list_in_range(
                parse_optional_date(start.as_deref())?,
                parse_optional_date(end.as_deref())?,
            )?;
            if let Some(category) = category {
                let wanted = category.trim().to_lowercase();
                expenses.retain(|e| {
                    e.category_label()
                        .is_some_and(|c| c.to_lowercase() == wanted)
                });
            }

            print!(
                "{}",
                format_expense_list(&expenses, &settings.currency_symbol, &settings.date_format)?
            );
        }
    }

    Ok(())
}

/// Handle a document command
pub fn handle_document_command(storage: &Storage, cmd: DocumentCommands) -> BillingResult<()> {
    let service = DocumentService::new(storage);
    let clients = ClientService::new(storage);

    match cmd {
        DocumentCommands::Add {
            path,
            client,
            category,
        } => {
            let client_id = match client {
                Some(c) => Some(clients.resolve(&c)?.id),
                None => None,
            };
            let document = service.register(&path, client_id, category)?;
            println!("Registered document: {} ({} bytes)", document.name, document.size);
            println!("  ID: {}", document.id);
        }

        DocumentCommands::List { client } => {
            let client_id = match client {
                Some(c) => Some(clients.resolve(&c)?.id),
                None => None,
            };
            let documents = service.list(client_id)?;
            print!("{}", format_document_list(&documents, &client_names(storage)?));
        }
    }

    Ok(())
}
