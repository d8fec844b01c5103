//! Service layer for the finance tracker
//!
//! Services borrow the store's state and derive figures from it: budget
//! progress, subscription spend and income/expense summaries. They never
//! mutate anything.

pub mod budget;
pub mod subscription;
pub mod summary;

pub use budget::{BudgetProgress, BudgetService, BudgetStatus};
pub use subscription::{SpendBreakdown, SubscriptionService, SubscriptionShare, UpcomingRenewal};
pub use summary::{CategorySpending, MonthSummary, SummaryService};
