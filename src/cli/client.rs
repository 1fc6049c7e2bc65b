//! Client CLI commands
//!
//! Implements CLI commands for client management.

use clap::Subcommand;

use crate::billing::ledger;
use crate::config::settings::Settings;
use crate::display::{format_client_details, format_client_list};
use crate::error::BillingResult;
use crate::services::{ClientDetails, ClientService};
use crate::storage::Storage;

/// Client subcommands
#[derive(Subcommand)]
pub enum ClientCommands {
    /// Add a new client
    Add {
        /// Client name
        name: String,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        company: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List all clients with their balances
    List,
    /// Show client details
    Show {
        /// Client name or ID
        client: String,
    },
    /// Edit a client (pass an empty string to clear a field)
    Edit {
        /// Client name or ID
        client: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        company: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a client with all of its payments, invoices and documents
    Delete {
        /// Client name or ID
        client: String,
    },
}

/// Handle a client command
pub fn handle_client_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ClientCommands,
) -> BillingResult<()> {
    let service = ClientService::new(storage);

    match cmd {
        ClientCommands::Add {
            name,
            email,
            phone,
            company,
            notes,
        } => {
            let client = service.create(
                &name,
                ClientDetails {
                    email,
                    phone,
                    company,
                    notes,
                },
            )?;
            println!("Created client: {}", client);
            println!("  ID: {}", client.id);
        }

        ClientCommands::List => {
            let payments = storage.payments.get_all()?;
            let mut rows = Vec::new();
            for client in service.list()? {
                let summary = ledger::summarize(ledger::for_client(&payments, client.id))?;
                rows.push((client, summary));
            }
            print!("{}", format_client_list(&rows, &settings.currency_symbol));
        }

        ClientCommands::Show { client } => {
            let found = service.resolve(&client)?;
            print!("{}", format_client_details(&found));
        }

        ClientCommands::Edit {
            client,
            name,
            email,
            phone,
            company,
            notes,
        } => {
            let found = service.resolve(&client)?;

            if name.is_none()
                && email.is_none()
                && phone.is_none()
                && company.is_none()
                && notes.is_none()
            {
                println!("No changes specified. Use --name, --email, --phone, --company or --notes.");
                return Ok(());
            }

            let updated = service.update(
                found.id,
                name.as_deref(),
                ClientDetails {
                    email,
                    phone,
                    company,
                    notes,
                },
            )?;
            println!("Updated client: {}", updated);
        }

        ClientCommands::Delete { client } => {
            let found = service.resolve(&client)?;
            let removed = service.delete(found.id)?;
            println!("Deleted client: {}", found.name);
            println!(
                "  Also removed {} payment(s), {} invoice(s), {} document(s)",
                removed.payments, removed.invoices, removed.documents
            );
        }
    }

    Ok(())
}
