//! Transaction model
//!
//! A transaction is a single income or expense entry. Amounts are signed:
//! expenses are negative, income is positive, and the sign always agrees with
//! the transaction type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::validation::{require_finite, require_text};
use crate::error::{TrackerError, TrackerResult};

/// Direction of money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Sign applied to a magnitude for this type
    pub fn sign(&self) -> f64 {
        match self {
            Self::Income => 1.0,
            Self::Expense => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn from_new(id: TransactionId, new: NewTransaction) -> Self {
        Self {
            id,
            description: new.description,
            amount: new.amount,
            kind: new.kind,
            category: new.category,
            date: new.date,
            notes: new.notes,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Unsigned amount
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }

    pub fn validate(&self) -> TrackerResult<()> {
        validate_fields(&self.description, self.amount, self.kind, &self.category)
    }

    /// Merge the fields present in `patch`
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

fn validate_fields(
    description: &str,
    amount: f64,
    kind: TransactionType,
    category: &str,
) -> TrackerResult<()> {
    require_text("description", description)?;
    require_text("category", category)?;
    require_finite("amount", amount)?;

    if amount == 0.0 {
        return Err(TrackerError::validation("amount cannot be zero"));
    }
    if amount.signum() != kind.sign() {
        return Err(TrackerError::validation(format!(
            "amount {} does not match transaction type '{}'",
            amount, kind
        )));
    }
    Ok(())
}

/// Input for creating a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl NewTransaction {
    /// An expense of `magnitude`, stored as a negative amount
    pub fn expense(
        description: impl Into<String>,
        magnitude: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount: -magnitude.abs(),
            kind: TransactionType::Expense,
            category: category.into(),
            date,
            notes: None,
        }
    }

    /// Income of `magnitude`, stored as a positive amount
    pub fn income(
        description: impl Into<String>,
        magnitude: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount: magnitude.abs(),
            kind: TransactionType::Income,
            category: category.into(),
            date,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> TrackerResult<()> {
        validate_fields(&self.description, self.amount, self.kind, &self.category)
    }
}

/// Partial update for a transaction; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}
