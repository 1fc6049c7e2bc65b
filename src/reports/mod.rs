//! Reports module for billtrack
//!
//! Provides the account dashboard, per-client statements and expense
//! summaries, with terminal and CSV output.

pub mod dashboard;
pub mod expenses;
pub mod statement;

pub use dashboard::DashboardReport;
pub use expenses::{CategoryTotal, ExpenseSummaryReport};
pub use statement::ClientStatement;
