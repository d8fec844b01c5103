//! Finance Tracker - personal finance tracking core
//!
//! This library holds the state and derivation core of a personal finance
//! tracker: transactions, budgets, subscriptions and user settings, kept in
//! one store that persists itself locally after every change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, subscriptions, billing cycles)
//! - `storage`: Key-value persistence of the store as a versioned JSON blob
//! - `store`: The mutable store and its operations
//! - `services`: Derived figures (budget progress, subscription spend, summaries)
//! - `display`: Currency, date and percentage formatting
//! - `export`: CSV export
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::TrackerPaths;
//! use finance_tracker::storage::FileKeyValueStore;
//! use finance_tracker::store::Store;
//!
//! let paths = TrackerPaths::new()?;
//! let mut store = Store::open(FileKeyValueStore::from_paths(&paths));
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;

pub use error::{TrackerError, TrackerResult};
pub use store::Store;
