//! Billing aggregation engine
//!
//! Pure functions that turn ledger records into derived figures: line item
//! amounts, invoice totals, payment status transitions, paid/outstanding
//! balances, time-bucketed revenue series and the dashboard summary. Nothing
//! here reads or writes storage; every function takes the exact records it
//! summarizes.

pub mod classifier;
pub mod dashboard;
pub mod ledger;
pub mod line_item;
pub mod snapshot;
pub mod timeseries;
pub mod totals;

pub use dashboard::{DashboardSummary, InvoiceStatusCount};
pub use ledger::{summarize, LedgerSummary};
pub use snapshot::AccountSnapshot;
pub use timeseries::{daily_timeline, monthly_revenue, status_distribution, DailyRevenue, MonthlyRevenue, StatusTotal};
pub use totals::{totals, InvoiceTotals};
