//! Core data models for billtrack
//!
//! This module contains the records of the billing domain: clients,
//! payments, invoices with their line items, expenses and document metadata,
//! plus the value types they are built from.

pub mod client;
pub mod document;
pub mod expense;
pub mod ids;
pub mod invoice;
pub mod money;
pub mod payment;
pub mod quantity;
pub mod tax_rate;

pub use client::Client;
pub use document::Document;
pub use expense::Expense;
pub use ids::{ClientId, DocumentId, ExpenseId, InvoiceId, PaymentId};
pub use invoice::{Invoice, InvoiceStatus, LineItem};
pub use money::Money;
pub use payment::{Frequency, Payment, PaymentStatus, Recurrence};
pub use quantity::Quantity;
pub use tax_rate::TaxRate;
