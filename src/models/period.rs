//! Budget period windows
//!
//! A budget's period is a billing cycle; the window is the calendar-aligned
//! date range of the current period that contains a given day:
//!
//! - hour/day: the last `count` days (hours round up to whole days)
//! - week: `count` ISO weeks (Monday start) ending with the current week
//! - month: `count` calendar months ending with the current month
//! - year: `count` calendar years ending with the current year

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::cycle::{BillingCycle, CycleUnit};

/// An inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The window of `cycle` that contains `today`. Windows reaching past
    /// the earliest representable date start at `NaiveDate::MIN`.
    pub fn current(cycle: &BillingCycle, today: NaiveDate) -> Self {
        let back = cycle.count.max(1) - 1;

        match cycle.unit {
            CycleUnit::Hour => {
                let days = (cycle.count.max(1) as i64 + 23) / 24;
                Self::new(days_before(today, days - 1), today)
            }
            CycleUnit::Day => Self::new(days_before(today, back as i64), today),
            CycleUnit::Week => {
                let monday = days_before(today, today.weekday().num_days_from_monday() as i64);
                let sunday = monday
                    .checked_add_signed(Duration::days(6))
                    .unwrap_or(NaiveDate::MAX);
                Self::new(days_before(monday, back as i64 * 7), sunday)
            }
            CycleUnit::Month => {
                let first = first_of_month(today.year(), today.month());
                let start = first
                    .checked_sub_months(Months::new(back))
                    .unwrap_or(NaiveDate::MIN);
                Self::new(start, last_of_month(today.year(), today.month()))
            }
            CycleUnit::Year => {
                let start = i32::try_from(back)
                    .ok()
                    .and_then(|back| today.year().checked_sub(back))
                    .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
                    .unwrap_or(NaiveDate::MIN);
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                Self::new(start, end)
            }
        }
    }

    /// A single calendar month
    pub fn month(year: i32, month: u32) -> Self {
        Self::new(first_of_month(year, month), last_of_month(year, month))
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, inclusive
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// `date` minus `days`, saturating at the earliest representable date
fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|d| date.checked_sub_signed(d))
        .unwrap_or(NaiveDate::MIN)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cycle(count: u32, unit: CycleUnit) -> BillingCycle {
        BillingCycle { count, unit }
    }

    #[test]
    fn test_monthly_window() {
        let window = PeriodWindow::current(&BillingCycle::monthly(), date(2024, 2, 14));
        assert_eq!(window, PeriodWindow::new(date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(window.days(), 29);
    }

    #[test]
    fn test_quarterly_window_spans_previous_months() {
        let window = PeriodWindow::current(&cycle(3, CycleUnit::Month), date(2024, 1, 20));
        assert_eq!(window, PeriodWindow::new(date(2023, 11, 1), date(2024, 1, 31)));
    }

    #[test]
    fn test_weekly_window_starts_monday() {
        // 2024-01-10 is a Wednesday
        let window = PeriodWindow::current(&BillingCycle::weekly(), date(2024, 1, 10));
        assert_eq!(window, PeriodWindow::new(date(2024, 1, 8), date(2024, 1, 14)));

        let two = PeriodWindow::current(&cycle(2, CycleUnit::Week), date(2024, 1, 10));
        assert_eq!(two.start, date(2024, 1, 1));
    }

    #[test]
    fn test_daily_and_hourly_windows() {
        let today = date(2024, 3, 10);
        assert_eq!(
            PeriodWindow::current(&cycle(1, CycleUnit::Day), today),
            PeriodWindow::new(today, today)
        );
        assert_eq!(
            PeriodWindow::current(&cycle(7, CycleUnit::Day), today).start,
            date(2024, 3, 4)
        );
        assert_eq!(
            PeriodWindow::current(&cycle(6, CycleUnit::Hour), today),
            PeriodWindow::new(today, today)
        );
        assert_eq!(
            PeriodWindow::current(&cycle(48, CycleUnit::Hour), today).start,
            date(2024, 3, 9)
        );
    }

    #[test]
    fn test_yearly_window() {
        let window = PeriodWindow::current(&BillingCycle::yearly(), date(2024, 7, 4));
        assert_eq!(window, PeriodWindow::new(date(2024, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_huge_counts_saturate_at_earliest_date() {
        let today = date(2024, 1, 1);
        for unit in [
            CycleUnit::Hour,
            CycleUnit::Day,
            CycleUnit::Week,
            CycleUnit::Month,
            CycleUnit::Year,
        ] {
            for count in [200_000_000, u32::MAX] {
                let window = PeriodWindow::current(&cycle(count, unit), today);
                assert!(window.contains(today), "{:?} x {}", unit, count);
                assert!(window.start <= today);
            }
        }

        let days = PeriodWindow::current(&cycle(200_000_000, CycleUnit::Day), today);
        assert_eq!(days.start, NaiveDate::MIN);
    }

    #[test]
    fn test_december_month_window() {
        let window = PeriodWindow::month(2023, 12);
        assert_eq!(window.end, date(2023, 12, 31));
        assert!(window.contains(date(2023, 12, 1)));
        assert!(!window.contains(date(2024, 1, 1)));
    }
}
