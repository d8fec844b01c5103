//! Budget service
//!
//! Derives budget progress: how much of each budget's limit has been spent
//! in the budget's current period. Nothing here is stored; every figure is
//! recomputed from the transactions on each call.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, BudgetId, PeriodWindow};
use crate::storage::StoreState;

/// Percentage at which a budget enters the warning tier
pub const WARNING_THRESHOLD: f64 = 75.0;

/// Percentage at which a budget counts as over
pub const OVER_THRESHOLD: f64 = 90.0;

/// Status tier of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Under 75%
    Ok,
    /// 75% up to 90%
    Warning,
    /// 90% and above
    Over,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= OVER_THRESHOLD {
            Self::Over
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending against one budget in its current period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: BudgetId,
    pub name: String,
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    /// `limit - spent`; negative once overspent
    pub remaining: f64,
    /// `spent / limit * 100`, not capped at 100
    pub percentage: f64,
    pub status: BudgetStatus,
    pub window: PeriodWindow,
}

/// Service for budget progress
pub struct BudgetService<'a> {
    state: &'a StoreState,
}

impl<'a> BudgetService<'a> {
    pub fn new(state: &'a StoreState) -> Self {
        Self { state }
    }

    /// Progress of every budget, in insertion order, as of `today`
    pub fn progress(&self, today: NaiveDate) -> Vec<BudgetProgress> {
        self.state
            .budgets
            .iter()
            .map(|budget| self.progress_of(budget, today))
            .collect()
    }

    /// Progress of every budget as of the local date
    pub fn progress_today(&self) -> Vec<BudgetProgress> {
        self.progress(Local::now().date_naive())
    }

    /// Progress of a single budget
    pub fn progress_for(&self, id: BudgetId, today: NaiveDate) -> TrackerResult<BudgetProgress> {
        self.state
            .budgets
            .iter()
            .find(|b| b.id == id)
            .map(|budget| self.progress_of(budget, today))
            .ok_or_else(|| TrackerError::budget_not_found(id.to_string()))
    }

    /// Budgets at or above the warning tier
    pub fn alerts(&self, today: NaiveDate) -> Vec<BudgetProgress> {
        self.progress(today)
            .into_iter()
            .filter(|p| p.status != BudgetStatus::Ok)
            .collect()
    }

    /// Total expense magnitude in `category` within `window`
    pub fn spent_in(&self, category: &str, window: &PeriodWindow) -> f64 {
        self.state
            .transactions
            .iter()
            .filter(|t| t.is_expense() && t.category == category && window.contains(t.date))
            .map(|t| t.magnitude())
            .sum()
    }

    fn progress_of(&self, budget: &Budget, today: NaiveDate) -> BudgetProgress {
        let window = PeriodWindow::current(&budget.period, today);
        let spent = self.spent_in(&budget.category, &window);
        let percentage = if budget.limit > 0.0 {
            spent / budget.limit * 100.0
        } else {
            0.0
        };

        BudgetProgress {
            budget_id: budget.id,
            name: budget.name.clone(),
            category: budget.category.clone(),
            limit: budget.limit,
            spent,
            remaining: budget.limit - spent,
            percentage,
            status: BudgetStatus::from_percentage(percentage),
            window,
        }
    }
}
