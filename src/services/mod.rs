//! Service layer for billtrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, lookups by ID or name, and cross-entity checks.

pub mod client;
pub mod document;
pub mod expense;
pub mod invoice;
pub mod payment;

pub use client::{ClientDetails, ClientService};
pub use document::DocumentService;
pub use expense::ExpenseService;
pub use invoice::InvoiceService;
pub use payment::{NewPayment, PaymentService};
