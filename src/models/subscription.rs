//! Subscription model
//!
//! A subscription is a recurring charge with a billing cycle and the date of
//! its next renewal. Only active subscriptions count toward spend figures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::cycle::BillingCycle;
use super::icon::Icon;
use super::ids::SubscriptionId;
use super::validation::{require_color, require_positive, require_text};
use crate::error::TrackerResult;

/// Category used for subscriptions created without one
pub const DEFAULT_SUBSCRIPTION_CATEGORY: &str = "Subscriptions";

fn default_active() -> bool {
    true
}

fn default_category() -> String {
    DEFAULT_SUBSCRIPTION_CATEGORY.to_string()
}

/// A recurring charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    pub amount: f64,
    pub cycle: BillingCycle,
    pub next_billing: NaiveDate,
    #[serde(default)]
    pub icon: Icon,
    pub color: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Subscription {
    pub fn from_new(id: SubscriptionId, new: NewSubscription) -> Self {
        Self {
            id,
            name: new.name,
            amount: new.amount,
            cycle: new.cycle,
            next_billing: new.next_billing,
            icon: new.icon,
            color: new.color,
            category: new.category,
            notes: new.notes,
            active: new.active,
        }
    }

    /// Cost normalized to an average month
    pub fn monthly_equivalent(&self) -> f64 {
        self.cycle.monthly_equivalent(self.amount)
    }

    /// Next billing date on or after `today`
    pub fn upcoming_billing(&self, today: NaiveDate) -> NaiveDate {
        self.cycle.next_on_or_after(self.next_billing, today)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        validate_fields(&self.name, self.amount, &self.cycle, &self.color, &self.category)
    }

    /// Merge the fields present in `patch`
    pub fn apply(&mut self, patch: SubscriptionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(cycle) = patch.cycle {
            self.cycle = cycle;
        }
        if let Some(next_billing) = patch.next_billing {
            self.next_billing = next_billing;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }
}

fn validate_fields(
    name: &str,
    amount: f64,
    cycle: &BillingCycle,
    color: &str,
    category: &str,
) -> TrackerResult<()> {
    require_text("name", name)?;
    require_text("category", category)?;
    require_positive("amount", amount)?;
    require_color(color)?;
    cycle.validate()
}

/// Input for creating a subscription
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub name: String,
    pub amount: f64,
    pub cycle: BillingCycle,
    pub next_billing: NaiveDate,
    pub icon: Icon,
    pub color: String,
    pub category: String,
    pub notes: Option<String>,
    pub active: bool,
}

impl NewSubscription {
    /// An active subscription with the default icon, color and category
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        cycle: BillingCycle,
        next_billing: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            cycle,
            next_billing,
            icon: Icon::default(),
            color: "#6366f1".to_string(),
            category: default_category(),
            notes: None,
            active: true,
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

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn validate(&self) -> TrackerResult<()> {
        validate_fields(&self.name, self.amount, &self.cycle, &self.color, &self.category)
    }
}

/// Partial update for a subscription; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionPatch {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub cycle: Option<BillingCycle>,
    pub next_billing: Option<NaiveDate>,
    pub icon: Option<Icon>,
    pub color: Option<String>,
    pub category: Option<String>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
    pub active: Option<bool>,
}
