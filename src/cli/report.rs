//! CLI commands for reports
//!
//! Provides commands for printing and exporting the dashboard, client
//! statements and expense summaries.

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::parse_optional_date;
use crate::config::settings::Settings;
use crate::error::{BillingError, BillingResult};
use crate::reports::{ClientStatement, DashboardReport, ExpenseSummaryReport};
use crate::services::ClientService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Account dashboard: balances, revenue trends and status breakdown
    Dashboard {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Statement for one client
    Statement {
        /// Client name or ID
        client: String,
    },

    /// Expenses by category
    Expenses {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BillingResult<()> {
    match cmd {
        ReportCommands::Dashboard { output } => {
            let report = DashboardReport::generate(storage)?;
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Dashboard exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(&settings.currency_symbol)),
            }
        }

        ReportCommands::Statement { client } => {
            let client = ClientService::new(storage).resolve(&client)?;
            let statement = ClientStatement::generate(storage, client.id)?;
            print!(
                "{}",
                statement.format_terminal(&settings.currency_symbol, &settings.date_format)
            );
        }

        ReportCommands::Expenses { start, end, output } => {
            let start = parse_optional_date(start.as_deref())?;
            let end = parse_optional_date(end.as_deref())?;
            if let (Some(s), Some(e)) = (start, end) {
                if e < s {
                    return Err(BillingError::Validation(format!(
                        "End date {} is before start date {}",
                        e, s
                    )));
                }
            }

            let report = ExpenseSummaryReport::generate(storage, start, end)?;
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Expense summary exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(&settings.currency_symbol)),
            }
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> BillingResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BillingError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
