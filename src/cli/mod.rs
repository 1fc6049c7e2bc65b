//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod client;
pub mod expense;
pub mod invoice;
pub mod payment;
pub mod report;

pub use client::{handle_client_command, ClientCommands};
pub use expense::{handle_document_command, handle_expense_command, DocumentCommands, ExpenseCommands};
pub use invoice::{handle_invoice_command, InvoiceCommands};
pub use payment::{handle_payment_command, PaymentCommands};
pub use report::{handle_report_command, ReportCommands};

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{BillingError, BillingResult};
use crate::models::ClientId;
use crate::storage::Storage;

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(s: &str) -> BillingResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        BillingError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

/// Parse an optional date argument
pub(crate) fn parse_optional_date(s: Option<&str>) -> BillingResult<Option<NaiveDate>> {
    s.map(parse_date).transpose()
}

/// The local calendar date
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Client names keyed by ID, for list views
pub(crate) fn client_names(storage: &Storage) -> BillingResult<HashMap<ClientId, String>> {
    Ok(storage
        .clients
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert!(parse_date("03/10/2024").unwrap_err().is_validation());
        assert_eq!(parse_optional_date(None).unwrap(), None);
    }
}
