//! Budget model
//!
//! A budget caps spending in one category over a recurring period.

use serde::{Deserialize, Serialize};

use super::cycle::BillingCycle;
use super::icon::Icon;
use super::ids::BudgetId;
use super::validation::{require_color, require_positive, require_text};
use crate::error::TrackerResult;

/// A spending cap for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,
    pub name: String,
    pub limit: f64,
    pub category: String,
    #[serde(default)]
    pub icon: Icon,
    pub color: String,
    #[serde(default)]
    pub period: BillingCycle,
}

impl Budget {
    pub fn from_new(id: BudgetId, new: NewBudget) -> Self {
        Self {
            id,
            name: new.name,
            limit: new.limit,
            category: new.category,
            icon: new.icon,
            color: new.color,
            period: new.period,
        }
    }

    pub fn validate(&self) -> TrackerResult<()> {
        validate_fields(&self.name, self.limit, &self.category, &self.color, &self.period)
    }

    /// Merge the fields present in `patch`
    pub fn apply(&mut self, patch: BudgetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(limit) = patch.limit {
            self.limit = limit;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
    }
}

fn validate_fields(
    name: &str,
    limit: f64,
    category: &str,
    color: &str,
    period: &BillingCycle,
) -> TrackerResult<()> {
    require_text("name", name)?;
    require_text("category", category)?;
    require_positive("limit", limit)?;
    require_color(color)?;
    period.validate()
}

/// Input for creating a budget
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub name: String,
    pub limit: f64,
    pub category: String,
    pub icon: Icon,
    pub color: String,
    pub period: BillingCycle,
}

impl NewBudget {
    /// A monthly budget with the default icon and color
    pub fn monthly(name: impl Into<String>, limit: f64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limit,
            category: category.into(),
            icon: Icon::default(),
            color: "#22c55e".to_string(),
            period: BillingCycle::monthly(),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_period(mut self, period: BillingCycle) -> Self {
        self.period = period;
        self
    }

    pub fn validate(&self) -> TrackerResult<()> {
        validate_fields(&self.name, self.limit, &self.category, &self.color, &self.period)
    }
}

/// Partial update for a budget; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub limit: Option<f64>,
    pub category: Option<String>,
    pub icon: Option<Icon>,
    pub color: Option<String>,
    pub period: Option<BillingCycle>,
}
