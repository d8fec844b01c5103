//! Export module for the finance tracker
//!
//! Writes the store's collections as spreadsheet-compatible CSV.

pub mod csv;

pub use self::csv::{export_budgets_csv, export_subscriptions_csv, export_transactions_csv};
