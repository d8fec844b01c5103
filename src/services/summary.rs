//! Summary service
//!
//! Income, expense and spending-by-category totals over date ranges.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::PeriodWindow;
use crate::storage::StoreState;

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub window: PeriodWindow,
    pub income: f64,
    /// Expense magnitude, always non-negative
    pub expenses: f64,
    /// `income - expenses`
    pub net: f64,
    pub transaction_count: usize,
}

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: String,
    pub total: f64,
    pub transaction_count: usize,
    /// Percentage of all spending in the range
    pub percentage: f64,
}

/// Service for income and spending summaries
pub struct SummaryService<'a> {
    state: &'a StoreState,
}

impl<'a> SummaryService<'a> {
    pub fn new(state: &'a StoreState) -> Self {
        Self { state }
    }

    pub fn month_summary(&self, year: i32, month: u32) -> MonthSummary {
        self.summary_for(PeriodWindow::month(year, month))
    }

    /// Income, expenses and net over an arbitrary window
    pub fn summary_for(&self, window: PeriodWindow) -> MonthSummary {
        let mut income = 0.0;
        let mut expenses = 0.0;
        let mut transaction_count = 0;

        for txn in self.state.transactions.iter().filter(|t| window.contains(t.date)) {
            if txn.is_expense() {
                expenses += txn.magnitude();
            } else {
                income += txn.magnitude();
            }
            transaction_count += 1;
        }

        MonthSummary {
            window,
            income,
            expenses,
            net: income - expenses,
            transaction_count,
        }
    }

    /// Expense totals per category inside `window`, largest first
    pub fn spending_by_category(&self, window: &PeriodWindow) -> Vec<CategorySpending> {
        let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
        // First-seen order breaks ties deterministically
        let mut order: Vec<&str> = Vec::new();

        for txn in self
            .state
            .transactions
            .iter()
            .filter(|t| t.is_expense() && window.contains(t.date))
        {
            let entry = totals.entry(txn.category.as_str()).or_insert_with(|| {
                order.push(txn.category.as_str());
                (0.0, 0)
            });
            entry.0 += txn.magnitude();
            entry.1 += 1;
        }

        let grand_total: f64 = totals.values().map(|(total, _)| total).sum();

        let mut result: Vec<CategorySpending> = order
            .into_iter()
            .map(|category| {
                let (total, transaction_count) = totals[category];
                CategorySpending {
                    category: category.to_string(),
                    total,
                    transaction_count,
                    percentage: if grand_total > 0.0 {
                        total / grand_total * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        result.sort_by(|a, b| b.total.total_cmp(&a.total));
        result
    }

    /// Sum of all signed transaction amounts
    pub fn balance(&self) -> f64 {
        self.state.transactions.iter().map(|t| t.amount).sum()
    }
}
