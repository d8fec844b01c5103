//! Insertion-ordered entity collections
//!
//! All three entity kinds share the same add/update/remove semantics, so the
//! store drives them through this one trait.

use std::fmt::Display;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Budget, BudgetId, BudgetPatch, Subscription, SubscriptionId, SubscriptionPatch, Transaction,
    TransactionId, TransactionPatch,
};

/// An entity held in a store collection
pub trait Record: Clone {
    type Id: Copy + PartialEq + Display;
    type Patch;

    fn id(&self) -> Self::Id;
    fn apply(&mut self, patch: Self::Patch);
    fn validate(&self) -> TrackerResult<()>;
    fn not_found(id: Self::Id) -> TrackerError;
}

impl Record for Transaction {
    type Id = TransactionId;
    type Patch = TransactionPatch;

    fn id(&self) -> TransactionId {
        self.id
    }

    fn apply(&mut self, patch: TransactionPatch) {
        Transaction::apply(self, patch)
    }

    fn validate(&self) -> TrackerResult<()> {
        Transaction::validate(self)
    }

    fn not_found(id: TransactionId) -> TrackerError {
        TrackerError::transaction_not_found(id.to_string())
    }
}

impl Record for Budget {
    type Id = BudgetId;
    type Patch = BudgetPatch;

    fn id(&self) -> BudgetId {
        self.id
    }

    fn apply(&mut self, patch: BudgetPatch) {
        Budget::apply(self, patch)
    }

    fn validate(&self) -> TrackerResult<()> {
        Budget::validate(self)
    }

    fn not_found(id: BudgetId) -> TrackerError {
        TrackerError::budget_not_found(id.to_string())
    }
}

impl Record for Subscription {
    type Id = SubscriptionId;
    type Patch = SubscriptionPatch;

    fn id(&self) -> SubscriptionId {
        self.id
    }

    fn apply(&mut self, patch: SubscriptionPatch) {
        Subscription::apply(self, patch)
    }

    fn validate(&self) -> TrackerResult<()> {
        Subscription::validate(self)
    }

    fn not_found(id: SubscriptionId) -> TrackerError {
        TrackerError::subscription_not_found(id.to_string())
    }
}

pub(crate) fn find<T: Record>(items: &[T], id: T::Id) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// Merge `patch` into the entity with `id`. The merged entity is validated
/// on a copy, so a rejected patch leaves the collection untouched.
pub(crate) fn update<T: Record>(items: &mut [T], id: T::Id, patch: T::Patch) -> TrackerResult<()> {
    let slot = items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| T::not_found(id))?;

    let mut merged = slot.clone();
    merged.apply(patch);
    merged.validate()?;
    *slot = merged;
    Ok(())
}

/// Remove the entity with `id`, returning whether anything was removed
pub(crate) fn remove<T: Record>(items: &mut Vec<T>, id: T::Id) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}
