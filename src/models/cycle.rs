//! Billing cycle model
//!
//! A billing cycle is a recurrence of "every `count` `unit`s". It drives both
//! subscription renewals and budget periods, and normalizes arbitrary cadences
//! into a monthly equivalent so they can be compared.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TrackerError, TrackerResult};

/// Average number of days in a month
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

/// Average number of days in a year
pub const AVERAGE_DAYS_PER_YEAR: f64 = 365.25;

/// Time unit of a billing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CycleUnit {
    Hour,
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl CycleUnit {
    /// Length of one unit in days
    pub fn days(&self) -> f64 {
        match self {
            Self::Hour => 1.0 / 24.0,
            Self::Day => 1.0,
            Self::Week => 7.0,
            Self::Month => AVERAGE_DAYS_PER_MONTH,
            Self::Year => AVERAGE_DAYS_PER_YEAR,
        }
    }

    fn singular(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    fn adverb(&self) -> &'static str {
        match self {
            Self::Hour => "Hourly",
            Self::Day => "Daily",
            Self::Week => "Weekly",
            Self::Month => "Monthly",
            Self::Year => "Yearly",
        }
    }
}

/// A recurrence: every `count` `unit`s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingCycle {
    pub count: u32,
    pub unit: CycleUnit,
}

impl Default for BillingCycle {
    fn default() -> Self {
        Self::monthly()
    }
}

impl BillingCycle {
    /// Create a cycle, rejecting a zero count
    pub fn new(count: u32, unit: CycleUnit) -> TrackerResult<Self> {
        let cycle = Self { count, unit };
        cycle.validate()?;
        Ok(cycle)
    }

    pub fn monthly() -> Self {
        Self {
            count: 1,
            unit: CycleUnit::Month,
        }
    }

    pub fn weekly() -> Self {
        Self {
            count: 1,
            unit: CycleUnit::Week,
        }
    }

    pub fn yearly() -> Self {
        Self {
            count: 1,
            unit: CycleUnit::Year,
        }
    }

    pub fn validate(&self) -> TrackerResult<()> {
        if self.count == 0 {
            return Err(TrackerError::validation(
                "billing cycle count must be at least 1",
            ));
        }
        Ok(())
    }

    /// Length of the whole cycle in days
    pub fn length_in_days(&self) -> f64 {
        self.unit.days() * self.count as f64
    }

    /// Normalize `amount` billed once per cycle to an average 30.44-day month.
    ///
    /// The cycle must have a non-zero count.
    pub fn monthly_equivalent(&self, amount: f64) -> f64 {
        monthly_equivalent(amount, self)
    }

    /// The billing date one cycle after `date`.
    ///
    /// Month and year cycles clamp to the last valid day of the target month
    /// (Jan 31 + 1 month = Feb 28 or 29). Hour cycles advance by whole days,
    /// rounding up, so the date always moves forward. Saturates at the
    /// largest representable date.
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        self.nth_after(date, 1)
    }

    /// The billing date `n` cycles after `anchor`, computed from the anchor
    /// so that month-end clamping never accumulates.
    pub fn nth_after(&self, anchor: NaiveDate, n: u32) -> NaiveDate {
        let steps = self.count as u64 * n as u64;
        let shifted = match self.unit {
            CycleUnit::Hour => {
                let days_per_step = (self.count as i64 + 23) / 24;
                Duration::try_days(days_per_step.max(1) * n as i64)
                    .and_then(|d| anchor.checked_add_signed(d))
            }
            CycleUnit::Day => i64::try_from(steps)
                .ok()
                .and_then(Duration::try_days)
                .and_then(|d| anchor.checked_add_signed(d)),
            CycleUnit::Week => i64::try_from(steps * 7)
                .ok()
                .and_then(Duration::try_days)
                .and_then(|d| anchor.checked_add_signed(d)),
            CycleUnit::Month => u32::try_from(steps)
                .ok()
                .and_then(|m| anchor.checked_add_months(Months::new(m))),
            CycleUnit::Year => u32::try_from(steps * 12)
                .ok()
                .and_then(|m| anchor.checked_add_months(Months::new(m))),
        };
        shifted.unwrap_or(NaiveDate::MAX)
    }

    /// First billing date on or after `today`, stepping from `anchor`.
    ///
    /// Returns `anchor` unchanged when it is not in the past.
    pub fn next_on_or_after(&self, anchor: NaiveDate, today: NaiveDate) -> NaiveDate {
        if anchor >= today || self.count == 0 {
            return anchor;
        }

        let elapsed = (today - anchor).num_days() as f64;
        let mut n = (elapsed / self.length_in_days().max(1.0)).floor() as u32;

        // The estimate uses average month lengths; settle on the exact step.
        while n > 0 && self.nth_after(anchor, n - 1) >= today {
            n -= 1;
        }
        while self.nth_after(anchor, n) < today {
            n += 1;
        }
        self.nth_after(anchor, n)
    }

    /// Human-readable description ("Monthly", "Every 3 months")
    pub fn description(&self) -> String {
        if self.count == 1 {
            self.unit.adverb().to_string()
        } else {
            format!("Every {} {}s", self.count, self.unit.singular())
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Normalize `amount` billed once per `cycle` to an average 30.44-day month
pub fn monthly_equivalent(amount: f64, cycle: &BillingCycle) -> f64 {
    amount / cycle.length_in_days() * AVERAGE_DAYS_PER_MONTH
}
