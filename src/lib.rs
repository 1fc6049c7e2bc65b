//! billtrack - Terminal-based billing tracker
//!
//! This library provides the core functionality for billtrack: clients,
//! payments, invoices with line items, expenses and document metadata kept
//! in local JSON files, and the billing engine that derives balances,
//! invoice totals and revenue trends from them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `billing`: Pure aggregation engine (line items, invoice totals, payment
//!   status, ledger balances, time series, dashboard)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (clients, payments, invoices, etc.)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Dashboard, client statement and expense summary
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use billtrack::billing::DashboardSummary;
//! use billtrack::config::paths::BilltrackPaths;
//! use billtrack::storage::Storage;
//!
//! let mut storage = Storage::new(BilltrackPaths::new()?)?;
//! storage.load_all()?;
//! let summary = DashboardSummary::build(&storage.snapshot()?)?;
//! ```

pub mod billing;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BillingError, BillingResult};
