//! Subscription service
//!
//! Derives recurring spend figures from active subscriptions: each one's
//! monthly equivalent, the monthly total, each subscription's share of it,
//! and which renewals are coming up.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Subscription, SubscriptionId};
use crate::storage::StoreState;

/// One active subscription's part of the monthly spend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionShare {
    pub subscription_id: SubscriptionId,
    pub name: String,
    pub monthly_equivalent: f64,
    /// Percentage of the monthly total
    pub share: f64,
}

/// Monthly spend across all active subscriptions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendBreakdown {
    pub total_monthly: f64,
    pub total_yearly: f64,
    /// Largest monthly equivalent first; ties keep insertion order
    pub items: Vec<SubscriptionShare>,
}

/// A renewal falling inside a look-ahead window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRenewal {
    pub subscription_id: SubscriptionId,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub days_until: i64,
}

/// Service for subscription spend
pub struct SubscriptionService<'a> {
    state: &'a StoreState,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(state: &'a StoreState) -> Self {
        Self { state }
    }

    fn active(&self) -> impl Iterator<Item = &'a Subscription> {
        self.state.subscriptions.iter().filter(|s| s.active)
    }

    /// Sum of monthly equivalents of active subscriptions
    pub fn total_monthly(&self) -> f64 {
        self.active().map(Subscription::monthly_equivalent).sum()
    }

    pub fn breakdown(&self) -> SpendBreakdown {
        let mut items: Vec<SubscriptionShare> = self
            .active()
            .map(|sub| SubscriptionShare {
                subscription_id: sub.id,
                name: sub.name.clone(),
                monthly_equivalent: sub.monthly_equivalent(),
                share: 0.0,
            })
            .collect();

        let total_monthly: f64 = items.iter().map(|i| i.monthly_equivalent).sum();
        if total_monthly > 0.0 {
            for item in &mut items {
                item.share = item.monthly_equivalent / total_monthly * 100.0;
            }
        }

        // sort_by is stable, so equal amounts keep insertion order
        items.sort_by(|a, b| b.monthly_equivalent.total_cmp(&a.monthly_equivalent));

        SpendBreakdown {
            total_monthly,
            total_yearly: total_monthly * 12.0,
            items,
        }
    }

    /// Active renewals from `today` through `today + days`, soonest first
    pub fn upcoming(&self, today: NaiveDate, days: u32) -> Vec<UpcomingRenewal> {
        let horizon = today
            .checked_add_signed(Duration::days(days.into()))
            .unwrap_or(NaiveDate::MAX);

        let mut renewals: Vec<UpcomingRenewal> = self
            .active()
            .filter_map(|sub| {
                let date = sub.upcoming_billing(today);
                (date <= horizon).then(|| UpcomingRenewal {
                    subscription_id: sub.id,
                    name: sub.name.clone(),
                    amount: sub.amount,
                    date,
                    days_until: (date - today).num_days(),
                })
            })
            .collect();

        renewals.sort_by_key(|r| r.date);
        renewals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingCycle, CycleUnit, NewSubscription};
    use crate::storage::{MemoryKeyValueStore, STORAGE_KEY};
    use crate::store::Store;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(store: &mut Store, name: &str, amount: f64, cycle: BillingCycle) -> SubscriptionId {
        store
            .add_subscription(NewSubscription::new(name, amount, cycle, date(2024, 1, 15)))
            .unwrap()
    }

    #[test]
    fn test_breakdown_sorted_and_shares_sum_to_100() {
        let mut store = Store::in_memory();
        add(&mut store, "Cloud", 999.0, BillingCycle::yearly());
        add(&mut store, "Streaming", 499.0, BillingCycle::monthly());
        add(
            &mut store,
            "Paper",
            30.0,
            BillingCycle {
                count: 1,
                unit: CycleUnit::Week,
            },
        );

        let breakdown = SubscriptionService::new(store.state()).breakdown();
        let names: Vec<_> = breakdown.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Streaming", "Paper", "Cloud"]);

        let share_sum: f64 = breakdown.items.iter().map(|i| i.share).sum();
        assert!((share_sum - 100.0).abs() < 1e-9);
        assert!((breakdown.total_yearly - breakdown.total_monthly * 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut store = Store::in_memory();
        add(&mut store, "First", 10.0, BillingCycle::monthly());
        add(&mut store, "Second", 10.0, BillingCycle::monthly());
        add(&mut store, "Third", 10.0, BillingCycle::monthly());

        let breakdown = SubscriptionService::new(store.state()).breakdown();
        let names: Vec<_> = breakdown.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_inactive_subscriptions_are_excluded() {
        let mut store = Store::in_memory();
        add(&mut store, "Kept", 100.0, BillingCycle::monthly());
        let paused = add(&mut store, "Paused", 300.0, BillingCycle::monthly());
        store.set_subscription_active(paused, false).unwrap();

        let service = SubscriptionService::new(store.state());
        let breakdown = service.breakdown();
        assert_eq!(breakdown.items.len(), 1);
        assert_eq!(breakdown.items[0].share, 100.0);
        assert!((service.total_monthly() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_shares_stay_finite_after_loading_bad_cycle() {
        let blob = r##"{"version": 1, "subscriptions": [
            {"id": "750e8400-e29b-41d4-a716-446655440000", "name": "Broken", "amount": 5.0,
             "cycle": {"count": 0, "unit": "month"}, "nextBilling": "2024-02-01", "color": "#6366f1"},
            {"id": "750e8400-e29b-41d4-a716-446655440001", "name": "Music", "amount": 9.0,
             "cycle": {"count": 1, "unit": "month"}, "nextBilling": "2024-02-01", "color": "#6366f1"}
        ]}"##;
        let store = Store::open(MemoryKeyValueStore::with_entry(STORAGE_KEY, blob));

        let breakdown = SubscriptionService::new(store.state()).breakdown();
        assert!(breakdown.total_monthly.is_finite());
        let share_sum: f64 = breakdown.items.iter().map(|i| i.share).sum();
        assert!((share_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_breakdown() {
        let store = Store::in_memory();
        let breakdown = SubscriptionService::new(store.state()).breakdown();
        assert!(breakdown.items.is_empty());
        assert_eq!(breakdown.total_monthly, 0.0);
    }

    #[test]
    fn test_upcoming_renewals() {
        let mut store = Store::in_memory();
        store
            .add_subscription(NewSubscription::new(
                "Soon",
                5.0,
                BillingCycle::monthly(),
                date(2024, 3, 12),
            ))
            .unwrap();
        store
            .add_subscription(NewSubscription::new(
                "Overdue",
                7.0,
                BillingCycle::weekly(),
                date(2024, 3, 1),
            ))
            .unwrap();
        store
            .add_subscription(NewSubscription::new(
                "Later",
                9.0,
                BillingCycle::monthly(),
                date(2024, 4, 20),
            ))
            .unwrap();

        let upcoming = SubscriptionService::new(store.state()).upcoming(date(2024, 3, 10), 7);
        let names: Vec<_> = upcoming.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Soon", "Overdue"]);
        assert_eq!(upcoming[0].days_until, 2);
        // Overdue on Mar 1 rolls to Mar 15
        assert_eq!(upcoming[1].date, date(2024, 3, 15));
    }
}
