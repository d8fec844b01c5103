//! The domain store
//!
//! [`Store`] is the single owner of every transaction, budget, subscription
//! and the settings record. All mutation goes through its methods, each of
//! which either commits completely or returns an error with nothing changed.
//! After every successful mutation the full state is written through to the
//! key-value backend; a failed write is logged and surfaced through
//! [`Store::persistence_warning`] but never fails the mutation.

mod collection;

pub use collection::Record;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::settings::{CategoryKind, CustomCategory, SettingsPatch, UserSettings};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Budget, BudgetId, BudgetPatch, NewBudget, NewSubscription, NewTransaction, Subscription,
    SubscriptionId, SubscriptionPatch, Transaction, TransactionId, TransactionPatch,
};
use crate::storage::{KeyValueStore, MemoryKeyValueStore, Persistence, StoreState};

/// State container for the whole application
#[derive(Debug)]
pub struct Store<B: KeyValueStore = MemoryKeyValueStore> {
    state: StoreState,
    persistence: Persistence<B>,
}

impl Store<MemoryKeyValueStore> {
    /// A store backed by volatile memory only
    pub fn in_memory() -> Self {
        Self::open(MemoryKeyValueStore::new())
    }
}

impl<B: KeyValueStore> Store<B> {
    /// Rehydrate from `backend`. Never fails: unusable stored data yields an
    /// empty store with default settings.
    pub fn open(backend: B) -> Self {
        Self::with_persistence(Persistence::new(backend))
    }

    pub fn with_persistence(mut persistence: Persistence<B>) -> Self {
        let state = persistence.load();
        Self { state, persistence }
    }

    /// Latest persistence problem; `None` once a write succeeds again
    pub fn persistence_warning(&self) -> Option<&str> {
        self.persistence.warning()
    }

    pub fn backend(&self) -> &B {
        self.persistence.backend()
    }

    /// Read-only view of everything the store holds
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> StoreState {
        self.state.clone()
    }

    fn persist(&mut self) {
        if let Err(err) = self.persistence.save(&self.state) {
            warn!(error = %err, "could not persist store, continuing in memory");
        }
    }

    // ---- Transactions ----

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        collection::find(&self.state.transactions, id)
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> TrackerResult<TransactionId> {
        new.validate()?;

        let id = TransactionId::new();
        self.state.transactions.push(Transaction::from_new(id, new));
        debug!(%id, "added transaction");

        self.persist();
        Ok(id)
    }

    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> TrackerResult<()> {
        collection::update(&mut self.state.transactions, id, patch)?;
        debug!(%id, "updated transaction");

        self.persist();
        Ok(())
    }

    /// Remove a transaction. Removing an unknown id is a no-op.
    pub fn remove_transaction(&mut self, id: TransactionId) -> bool {
        let removed = collection::remove(&mut self.state.transactions, id);
        if removed {
            debug!(%id, "removed transaction");
            self.persist();
        }
        removed
    }

    // ---- Budgets ----

    pub fn budgets(&self) -> &[Budget] {
        &self.state.budgets
    }

    pub fn budget(&self, id: BudgetId) -> Option<&Budget> {
        collection::find(&self.state.budgets, id)
    }

    pub fn add_budget(&mut self, new: NewBudget) -> TrackerResult<BudgetId> {
        new.validate()?;

        let id = BudgetId::new();
        self.state.budgets.push(Budget::from_new(id, new));
        debug!(%id, "added budget");

        self.persist();
        Ok(id)
    }

    pub fn update_budget(&mut self, id: BudgetId, patch: BudgetPatch) -> TrackerResult<()> {
        collection::update(&mut self.state.budgets, id, patch)?;
        debug!(%id, "updated budget");

        self.persist();
        Ok(())
    }

    /// Remove a budget. Removing an unknown id is a no-op.
    pub fn remove_budget(&mut self, id: BudgetId) -> bool {
        let removed = collection::remove(&mut self.state.budgets, id);
        if removed {
            debug!(%id, "removed budget");
            self.persist();
        }
        removed
    }

    // ---- Subscriptions ----

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.state.subscriptions
    }

    pub fn subscription(&self, id: SubscriptionId) -> Option<&Subscription> {
        collection::find(&self.state.subscriptions, id)
    }

    pub fn add_subscription(&mut self, new: NewSubscription) -> TrackerResult<SubscriptionId> {
        new.validate()?;

        let id = SubscriptionId::new();
        self.state.subscriptions.push(Subscription::from_new(id, new));
        debug!(%id, "added subscription");

        self.persist();
        Ok(id)
    }

    pub fn update_subscription(
        &mut self,
        id: SubscriptionId,
        patch: SubscriptionPatch,
    ) -> TrackerResult<()> {
        collection::update(&mut self.state.subscriptions, id, patch)?;
        debug!(%id, "updated subscription");

        self.persist();
        Ok(())
    }

    /// Remove a subscription. Removing an unknown id is a no-op.
    pub fn remove_subscription(&mut self, id: SubscriptionId) -> bool {
        let removed = collection::remove(&mut self.state.subscriptions, id);
        if removed {
            debug!(%id, "removed subscription");
            self.persist();
        }
        removed
    }

    pub fn set_subscription_active(&mut self, id: SubscriptionId, active: bool) -> TrackerResult<()> {
        self.update_subscription(
            id,
            SubscriptionPatch {
                active: Some(active),
                ..Default::default()
            },
        )
    }

    /// Move every past-due active subscription to its first billing date on
    /// or after `today`. Returns how many subscriptions changed.
    pub fn roll_forward_subscriptions(&mut self, today: NaiveDate) -> usize {
        let mut changed = 0;
        for sub in self.state.subscriptions.iter_mut().filter(|s| s.active) {
            let next = sub.upcoming_billing(today);
            if next != sub.next_billing {
                debug!(id = %sub.id, from = %sub.next_billing, to = %next, "rolled subscription forward");
                sub.next_billing = next;
                changed += 1;
            }
        }

        if changed > 0 {
            self.persist();
        }
        changed
    }

    // ---- Settings ----

    pub fn settings(&self) -> &UserSettings {
        &self.state.settings
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> TrackerResult<()> {
        let mut merged = self.state.settings.clone();
        merged.apply(patch);
        merged.validate()?;

        self.state.settings = merged;
        debug!("updated settings");

        self.persist();
        Ok(())
    }

    /// Mark onboarding as done. One-way and idempotent.
    pub fn complete_onboarding(&mut self) {
        if self.state.settings.onboarding_completed {
            return;
        }
        self.state.settings.onboarding_completed = true;
        debug!("onboarding completed");
        self.persist();
    }

    /// Add a custom category; names are unique ignoring case
    pub fn add_custom_category(&mut self, name: &str, kind: CategoryKind) -> TrackerResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::validation("category name cannot be empty"));
        }
        if self.state.settings.custom_category(name).is_some() {
            return Err(TrackerError::validation(format!(
                "category '{}' already exists",
                name
            )));
        }

        self.state
            .settings
            .custom_categories
            .push(CustomCategory::new(name, kind));
        debug!(name = %name, "added custom category");

        self.persist();
        Ok(())
    }

    /// Remove a custom category. Removing an unknown name is a no-op.
    pub fn remove_custom_category(&mut self, name: &str) -> bool {
        let categories = &mut self.state.settings.custom_categories;
        let before = categories.len();
        categories.retain(|c| !c.name.eq_ignore_ascii_case(name.trim()));

        let removed = categories.len() != before;
        if removed {
            debug!(name = %name, "removed custom category");
            self.persist();
        }
        removed
    }

    /// Reset to an empty store with default settings and drop the stored blob
    pub fn clear_all(&mut self) {
        self.state = StoreState::default();
        debug!("cleared all data");

        if let Err(err) = self.persistence.clear() {
            warn!(error = %err, "could not clear stored state, continuing in memory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Theme;
    use crate::models::{BillingCycle, Icon, TransactionType};
    use crate::storage::{FileKeyValueStore, STORAGE_KEY};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn coffee() -> NewTransaction {
        NewTransaction::expense("Coffee", 150.0, "Food", date(2024, 1, 5))
    }

    /// Reads fine, refuses every write
    #[derive(Debug, Default)]
    struct ReadOnlyStore {
        inner: MemoryKeyValueStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> TrackerResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> TrackerResult<()> {
            Err(TrackerError::PersistenceUnavailable("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> TrackerResult<()> {
            Err(TrackerError::PersistenceUnavailable("quota exceeded".into()))
        }
    }

    #[test]
    fn test_add_then_get_round_trips() {
        let mut store = Store::in_memory();
        let new = coffee().with_notes("with oat milk");

        let id = store.add_transaction(new.clone()).unwrap();
        let txn = store.transaction(id).unwrap();

        assert_eq!(txn.id, id);
        assert_eq!(txn.description, new.description);
        assert_eq!(txn.amount, new.amount);
        assert_eq!(txn.kind, new.kind);
        assert_eq!(txn.category, new.category);
        assert_eq!(txn.date, new.date);
        assert_eq!(txn.notes, new.notes);
        assert_eq!(store.transactions().len(), 1);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = Store::in_memory();
        for name in ["Netflix", "Spotify", "Gym"] {
            store
                .add_subscription(NewSubscription::new(
                    name,
                    10.0,
                    BillingCycle::monthly(),
                    date(2024, 1, 1),
                ))
                .unwrap();
        }

        let names: Vec<_> = store.subscriptions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Netflix", "Spotify", "Gym"]);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = Store::in_memory();
        let first = store.add_transaction(coffee()).unwrap();
        store.remove_transaction(first);
        let second = store.add_transaction(coffee()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_add_is_rejected_without_mutation() {
        let mut store = Store::in_memory();
        let mut bad = coffee();
        bad.amount = f64::NAN;

        assert!(store.add_transaction(bad).unwrap_err().is_validation());
        assert!(store.transactions().is_empty());

        let err = store
            .add_budget(NewBudget::monthly("Food", 0.0, "Food"))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(store.budgets().is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = Store::in_memory();
        let id = store.add_transaction(coffee()).unwrap();

        assert!(store.remove_transaction(id));
        assert!(!store.remove_transaction(id));
        assert!(store.transactions().is_empty());

        assert!(!store.remove_budget(BudgetId::new()));
        assert!(!store.remove_subscription(SubscriptionId::new()));
    }

    #[test]
    fn test_empty_patch_leaves_entity_unchanged() {
        let mut store = Store::in_memory();
        let txn_id = store.add_transaction(coffee()).unwrap();
        let budget_id = store
            .add_budget(NewBudget::monthly("Food", 1000.0, "Food"))
            .unwrap();

        let txn_before = store.transaction(txn_id).cloned();
        let budget_before = store.budget(budget_id).cloned();

        store
            .update_transaction(txn_id, TransactionPatch::default())
            .unwrap();
        store.update_budget(budget_id, BudgetPatch::default()).unwrap();

        assert_eq!(store.transaction(txn_id).cloned(), txn_before);
        assert_eq!(store.budget(budget_id).cloned(), budget_before);
    }

    #[test]
    fn test_update_merges_and_preserves_other_fields() {
        let mut store = Store::in_memory();
        let id = store.add_transaction(coffee()).unwrap();

        store
            .update_transaction(
                id,
                TransactionPatch {
                    amount: Some(-175.0),
                    ..Default::default()
                },
            )
            .unwrap();

        let txn = store.transaction(id).unwrap();
        assert_eq!(txn.amount, -175.0);
        assert_eq!(txn.description, "Coffee");
        assert_eq!(txn.kind, TransactionType::Expense);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = Store::in_memory();
        let err = store
            .update_transaction(TransactionId::new(), TransactionPatch::default())
            .unwrap_err();
        assert!(err.is_not_found());

        let err = store
            .update_subscription(SubscriptionId::new(), SubscriptionPatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_that_breaks_sign_invariant_is_rejected() {
        let mut store = Store::in_memory();
        let id = store.add_transaction(coffee()).unwrap();

        let err = store
            .update_transaction(
                id,
                TransactionPatch {
                    kind: Some(TransactionType::Income),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(store.transaction(id).unwrap().kind, TransactionType::Expense);
    }

    #[test]
    fn test_settings_update_and_onboarding() {
        let mut store = Store::in_memory();
        store
            .update_settings(SettingsPatch {
                currency_code: Some("USD".into()),
                currency_symbol: Some("$".into()),
                theme: Some(Theme::Dark),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(store.settings().currency_code, "USD");
        assert_eq!(store.settings().theme, Theme::Dark);
        assert_eq!(store.settings().locale, "en-IN");

        let err = store
            .update_settings(SettingsPatch {
                currency_symbol: Some(String::new()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.settings().currency_symbol, "$");

        store.complete_onboarding();
        store.complete_onboarding();
        assert!(store.settings().onboarding_completed);
    }

    #[test]
    fn test_custom_categories() {
        let mut store = Store::in_memory();
        store.add_custom_category("Pets", CategoryKind::Expense).unwrap();

        let err = store
            .add_custom_category("pets", CategoryKind::Both)
            .unwrap_err();
        assert!(err.is_validation());

        assert!(store.remove_custom_category("PETS"));
        assert!(!store.remove_custom_category("PETS"));
        assert!(store.settings().custom_categories.is_empty());
    }

    #[test]
    fn test_settings_patch_cannot_bypass_category_rules() {
        let mut store = Store::in_memory();
        store.add_custom_category("Travel", CategoryKind::Expense).unwrap();

        for names in [vec!["", "Pets"], vec!["Pets", "pets"]] {
            let err = store
                .update_settings(SettingsPatch {
                    custom_categories: Some(
                        names
                            .into_iter()
                            .map(|n| CustomCategory::new(n, CategoryKind::Expense))
                            .collect(),
                    ),
                    ..Default::default()
                })
                .unwrap_err();
            assert!(err.is_validation());
        }

        let names: Vec<_> = store
            .settings()
            .custom_categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Travel"]);
    }

    #[test]
    fn test_roll_forward_subscriptions() {
        let mut store = Store::in_memory();
        let due = store
            .add_subscription(NewSubscription::new(
                "Music",
                9.99,
                BillingCycle::monthly(),
                date(2024, 1, 31),
            ))
            .unwrap();
        let paused = store
            .add_subscription(
                NewSubscription::new("Old", 5.0, BillingCycle::monthly(), date(2023, 6, 1))
                    .inactive(),
            )
            .unwrap();

        assert_eq!(store.roll_forward_subscriptions(date(2024, 3, 10)), 1);
        assert_eq!(store.subscription(due).unwrap().next_billing, date(2024, 3, 31));
        assert_eq!(store.subscription(paused).unwrap().next_billing, date(2023, 6, 1));
        assert_eq!(store.roll_forward_subscriptions(date(2024, 3, 10)), 0);
    }

    #[test]
    fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let (txn_id, sub_id) = {
            let mut store = Store::open(FileKeyValueStore::new(temp_dir.path()));
            let txn_id = store.add_transaction(coffee()).unwrap();
            let sub_id = store
                .add_subscription(
                    NewSubscription::new("Cloud", 999.0, BillingCycle::yearly(), date(2024, 6, 1))
                        .with_icon(Icon::Cloud),
                )
                .unwrap();
            store.complete_onboarding();
            (txn_id, sub_id)
        };

        let store = Store::open(FileKeyValueStore::new(temp_dir.path()));
        assert_eq!(store.transaction(txn_id).unwrap().description, "Coffee");
        assert_eq!(store.subscription(sub_id).unwrap().icon, Icon::Cloud);
        assert!(store.settings().onboarding_completed);
        assert!(store.persistence_warning().is_none());
    }

    #[test]
    fn test_open_on_corrupted_blob_starts_empty() {
        let store = Store::open(MemoryKeyValueStore::with_entry(STORAGE_KEY, "{{{garbage"));
        assert!(store.transactions().is_empty());
        assert!(store.budgets().is_empty());
        assert!(store.subscriptions().is_empty());
        assert_eq!(store.settings(), &UserSettings::default());
    }

    #[test]
    fn test_failed_persistence_does_not_block_mutation() {
        let mut store = Store::open(ReadOnlyStore::default());
        let id = store.add_transaction(coffee()).unwrap();

        assert!(store.transaction(id).is_some());
        assert!(store.persistence_warning().unwrap().contains("quota exceeded"));
    }

    #[test]
    fn test_clear_all() {
        let mut store = Store::in_memory();
        store.add_transaction(coffee()).unwrap();
        store.complete_onboarding();

        store.clear_all();
        assert_eq!(store.snapshot(), StoreState::default());
        assert_eq!(store.backend().get(STORAGE_KEY).unwrap(), None);
        assert!(store.persistence_warning().is_none());
    }

    #[test]
    fn test_clear_all_on_read_only_backend_still_resets() {
        let mut store = Store::open(ReadOnlyStore::default());
        store.add_transaction(coffee()).unwrap();

        store.clear_all();
        assert!(store.transactions().is_empty());
        assert!(store.persistence_warning().is_some());
    }
}
