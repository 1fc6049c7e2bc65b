//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display as
//! aligned tables and detail views.

pub mod client;
pub mod expense;
pub mod invoice;
pub mod payment;

pub use client::{format_client_details, format_client_list};
pub use expense::{format_document_list, format_expense_list};
pub use invoice::{format_invoice_details, format_invoice_list};
pub use payment::format_payment_list;

/// Pad or cut `s` to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
