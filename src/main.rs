use anyhow::Result;
use clap::{Parser, Subcommand};

use billtrack::cli::{
    handle_client_command, handle_document_command, handle_expense_command,
    handle_invoice_command, handle_payment_command, handle_report_command,
};
use billtrack::config::{paths::BilltrackPaths, settings::Settings};
use billtrack::logging::init_tracing;
use billtrack::models::TaxRate;
use billtrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "billtrack",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based billing tracker for small businesses",
    long_about = "billtrack keeps clients, payments, invoices and expenses in local \
                  JSON files and derives balances, invoice totals and revenue \
                  trends from them."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration, or change settings
    Config {
        /// Currency symbol used in output
        #[arg(long)]
        currency: Option<String>,
        /// Default tax rate for new invoices, in percent
        #[arg(long)]
        tax_rate: Option<String>,
        /// Days until an invoice is due when no due date is given
        #[arg(long)]
        terms: Option<u32>,
        /// Date format for output (strftime)
        #[arg(long)]
        date_format: Option<String>,
    },

    /// Client management commands
    #[command(subcommand)]
    Client(billtrack::cli::ClientCommands),

    /// Payment tracking commands
    #[command(subcommand, alias = "pay")]
    Payment(billtrack::cli::PaymentCommands),

    /// Invoice commands
    #[command(subcommand, alias = "inv")]
    Invoice(billtrack::cli::InvoiceCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(billtrack::cli::ExpenseCommands),

    /// Document metadata commands
    #[command(subcommand, alias = "doc")]
    Document(billtrack::cli::DocumentCommands),

    /// Reports
    #[command(subcommand)]
    Report(billtrack::cli::ReportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = BilltrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("billtrack is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing billtrack at: {}", paths.base_dir().display());
            billtrack::storage::init::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'billtrack client add <name>' to add your first client.");
        }
        Some(Commands::Config {
            currency,
            tax_rate,
            terms,
            date_format,
        }) => {
            let changing = currency.is_some()
                || tax_rate.is_some()
                || terms.is_some()
                || date_format.is_some();

            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(rate) = tax_rate {
                settings.default_tax_rate = TaxRate::parse(&rate)?;
            }
            if let Some(terms) = terms {
                settings.payment_terms_days = terms;
            }
            if let Some(format) = date_format {
                settings.set_date_format(&format)?;
            }
            if changing {
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("billtrack Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Default tax rate: {}", settings.default_tax_rate);
            println!("  Payment terms:    {} days", settings.payment_terms_days);
        }
        Some(Commands::Client(cmd)) => handle_client_command(&storage, &settings, cmd)?,
        Some(Commands::Payment(cmd)) => handle_payment_command(&storage, &settings, cmd)?,
        Some(Commands::Invoice(cmd)) => handle_invoice_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Document(cmd)) => handle_document_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        None => {
            println!("billtrack - Terminal-based billing tracker");
            println!();
            println!("Run 'billtrack --help' for usage information.");
        }
    }

    Ok(())
}
