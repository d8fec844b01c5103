//! Core data models for the finance tracker
//!
//! This module contains the data structures of the tracking domain:
//! transactions, budgets, subscriptions and the billing cycles they share.

pub mod budget;
pub mod cycle;
pub mod icon;
pub mod ids;
pub mod period;
pub mod subscription;
pub mod transaction;
mod validation;

pub use budget::{Budget, BudgetPatch, NewBudget};
pub use cycle::{monthly_equivalent, BillingCycle, CycleUnit};
pub use icon::Icon;
pub use ids::{BudgetId, SubscriptionId, TransactionId};
pub use period::PeriodWindow;
pub use subscription::{NewSubscription, Subscription, SubscriptionPatch};
pub use transaction::{NewTransaction, Transaction, TransactionPatch, TransactionType};
