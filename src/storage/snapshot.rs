//! Versioned snapshot of the whole store
//!
//! The full state is written as one JSON blob under a fixed key:
//!
//! ```json
//! {"version": 1, "transactions": [], "budgets": [], "subscriptions": [], "settings": {}}
//! ```
//!
//! Loading never fails the caller. A missing, malformed or incompatible blob
//! yields the default empty state, so the application always starts valid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, warn};

use crate::config::settings::UserSettings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Subscription, Transaction};

use super::kv::KeyValueStore;

/// Key the blob is stored under
pub const STORAGE_KEY: &str = "finance-tracker-storage";

/// Current blob schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Everything the store owns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub settings: UserSettings,
}

impl StoreState {
    /// Drop records that fail validation or repeat an earlier id, and
    /// repair settings. Returns how many records were dropped.
    pub fn retain_valid(&mut self) -> usize {
        let mut dropped =
            retain_unique_valid(&mut self.transactions, |t| t.id, |t| t.validate().is_ok());
        dropped += retain_unique_valid(&mut self.budgets, |b| b.id, |b| b.validate().is_ok());
        dropped +=
            retain_unique_valid(&mut self.subscriptions, |s| s.id, |s| s.validate().is_ok());
        dropped += self.settings.retain_valid_categories();

        if self.settings.validate().is_err() {
            let onboarding_completed = self.settings.onboarding_completed;
            self.settings = UserSettings {
                onboarding_completed,
                custom_categories: std::mem::take(&mut self.settings.custom_categories),
                ..UserSettings::default()
            };
        }
        dropped
    }
}

fn retain_unique_valid<T, K: Hash + Eq>(
    records: &mut Vec<T>,
    key: impl Fn(&T) -> K,
    valid: impl Fn(&T) -> bool,
) -> usize {
    let before = records.len();
    let mut seen = HashSet::new();
    records.retain(|record| valid(record) && seen.insert(key(record)));
    before - records.len()
}

#[derive(Serialize)]
struct PersistedRef<'a> {
    version: u32,
    #[serde(flatten)]
    state: &'a StoreState,
}

#[derive(Deserialize)]
struct Persisted {
    version: u32,
    #[serde(flatten)]
    state: StoreState,
}

/// Serialize a state into a versioned blob
pub fn encode(state: &StoreState) -> TrackerResult<String> {
    Ok(serde_json::to_string(&PersistedRef {
        version: SCHEMA_VERSION,
        state,
    })?)
}

/// Parse a versioned blob, rejecting other schema versions
pub fn decode(blob: &str) -> TrackerResult<StoreState> {
    let persisted: Persisted = serde_json::from_str(blob)?;

    if persisted.version != SCHEMA_VERSION {
        return Err(TrackerError::Json(format!(
            "unsupported schema version {} (expected {})",
            persisted.version, SCHEMA_VERSION
        )));
    }
    Ok(persisted.state)
}

/// Reads and writes the snapshot through a key-value backend
#[derive(Debug)]
pub struct Persistence<B: KeyValueStore> {
    backend: B,
    key: String,
    warning: Option<String>,
}

impl<B: KeyValueStore> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            warning: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Latest persistence problem, if the last load or save failed
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Load the stored state, falling back to defaults
    pub fn load(&mut self) -> StoreState {
        let blob = match self.backend.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(key = %self.key, "no stored state, starting empty");
                return StoreState::default();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "storage unreadable, starting in memory only");
                self.warning = Some(err.to_string());
                return StoreState::default();
            }
        };

        match decode(&blob) {
            Ok(mut state) => {
                let dropped = state.retain_valid();
                if dropped > 0 {
                    warn!(key = %self.key, dropped, "dropped invalid records from stored state");
                }
                debug!(
                    transactions = state.transactions.len(),
                    budgets = state.budgets.len(),
                    subscriptions = state.subscriptions.len(),
                    "rehydrated stored state"
                );
                state
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "discarding unusable stored state");
                StoreState::default()
            }
        }
    }

    /// Write the full state. Records or clears the persistence warning.
    pub fn save(&mut self, state: &StoreState) -> TrackerResult<()> {
        let result = encode(state).and_then(|blob| self.backend.set(&self.key, &blob));
        self.record(result)
    }

    /// Drop the stored blob entirely
    pub fn clear(&mut self) -> TrackerResult<()> {
        let result = self.backend.remove(&self.key);
        self.record(result)
    }

    fn record(&mut self, result: TrackerResult<()>) -> TrackerResult<()> {
        let result = result.map_err(|err| match err {
            err @ TrackerError::PersistenceUnavailable(_) => err,
            other => TrackerError::PersistenceUnavailable(other.to_string()),
        });
        self.warning = result.as_ref().err().map(|err| err.to_string());
        result
    }
}
