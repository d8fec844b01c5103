//! User settings for the finance tracker
//!
//! Manages user preferences including currency, locale, date format, theme,
//! and custom categories. Settings are persisted as part of the store blob,
//! and every field carries a serde default so older blobs still rehydrate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TrackerError, TrackerResult};
use crate::models::TransactionType;

/// Built-in expense categories
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Health",
    "Education",
    "Travel",
    "Subscriptions",
    "Other",
];

/// Built-in income categories
pub const DEFAULT_INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investments", "Gifts", "Other"];

/// Date format preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateFormat {
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[default]
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDay,
}

impl DateFormat {
    /// chrono format string for this preference
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::MonthDayYear => "%m/%d/%Y",
            Self::DayMonthYear => "%d/%m/%Y",
            Self::YearMonthDay => "%Y-%m-%d",
        }
    }
}

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Which transaction types a category applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

impl CategoryKind {
    pub fn applies_to(&self, kind: TransactionType) -> bool {
        matches!(
            (self, kind),
            (Self::Both, _)
                | (Self::Income, TransactionType::Income)
                | (Self::Expense, TransactionType::Expense)
        )
    }
}

/// A user-defined category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub name: String,
    pub kind: CategoryKind,
}

impl CustomCategory {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for CustomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// ISO 4217 currency code
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Symbol shown next to amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// BCP 47 locale tag used for number formatting
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub date_format: DateFormat,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub custom_categories: Vec<CustomCategory>,

    /// Whether initial setup has been completed
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_locale() -> String {
    "en-IN".to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            locale: default_locale(),
            date_format: DateFormat::default(),
            theme: Theme::default(),
            custom_categories: Vec::new(),
            onboarding_completed: false,
        }
    }
}

impl UserSettings {
    /// Category names available for a transaction type: built-ins first,
    /// then matching custom categories, without duplicates
    pub fn categories_for(&self, kind: TransactionType) -> Vec<String> {
        let defaults = match kind {
            TransactionType::Income => DEFAULT_INCOME_CATEGORIES,
            TransactionType::Expense => DEFAULT_EXPENSE_CATEGORIES,
        };

        let mut names: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
        for custom in self.custom_categories.iter().filter(|c| c.kind.applies_to(kind)) {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&custom.name)) {
                names.push(custom.name.clone());
            }
        }
        names
    }

    /// Find a custom category by name, ignoring case
    pub fn custom_category(&self, name: &str) -> Option<&CustomCategory> {
        self.custom_categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn validate(&self) -> TrackerResult<()> {
        if self.currency_code.trim().is_empty() {
            return Err(TrackerError::validation("currency code cannot be empty"));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(TrackerError::validation("currency symbol cannot be empty"));
        }
        if self.locale.trim().is_empty() {
            return Err(TrackerError::validation("locale cannot be empty"));
        }

        for (i, category) in self.custom_categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(TrackerError::validation("category name cannot be empty"));
            }
            let earlier = &self.custom_categories[..i];
            if earlier
                .iter()
                .any(|c| c.name.trim().eq_ignore_ascii_case(category.name.trim()))
            {
                return Err(TrackerError::validation(format!(
                    "category '{}' already exists",
                    category.name.trim()
                )));
            }
        }
        Ok(())
    }

    /// Drop blank and case-insensitively repeated custom categories, keeping
    /// the first of each name. Returns how many were dropped.
    pub fn retain_valid_categories(&mut self) -> usize {
        let before = self.custom_categories.len();
        let mut seen: Vec<String> = Vec::new();
        self.custom_categories.retain(|c| {
            let key = c.name.trim().to_lowercase();
            if key.is_empty() || seen.contains(&key) {
                return false;
            }
            seen.push(key);
            true
        });
        before - self.custom_categories.len()
    }

    /// Merge the fields present in `patch`
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(code) = patch.currency_code {
            self.currency_code = code;
        }
        if let Some(symbol) = patch.currency_symbol {
            self.currency_symbol = symbol;
        }
        if let Some(locale) = patch.locale {
            self.locale = locale;
        }
        if let Some(date_format) = patch.date_format {
            self.date_format = date_format;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(custom_categories) = patch.custom_categories {
            self.custom_categories = custom_categories;
        }
    }
}

/// Partial update for settings; `None` leaves a field untouched.
///
/// Onboarding has its own one-way transition and is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub currency_code: Option<String>,
    pub currency_symbol: Option<String>,
    pub locale: Option<String>,
    pub date_format: Option<DateFormat>,
    pub theme: Option<Theme>,
    pub custom_categories: Option<Vec<CustomCategory>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = UserSettings::default();
        assert_eq!(settings.currency_code, "INR");
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.theme, Theme::System);
        assert!(!settings.onboarding_completed);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"currencyCode": "USD", "currencySymbol": "$"}"#).unwrap();
        assert_eq!(settings.currency_code, "USD");
        assert_eq!(settings.locale, "en-IN");
        assert_eq!(settings.date_format, DateFormat::DayMonthYear);
    }

    #[test]
    fn test_date_format_serialization() {
        let json = serde_json::to_string(&DateFormat::YearMonthDay).unwrap();
        assert_eq!(json, "\"YYYY-MM-DD\"");
    }

    #[test]
    fn test_categories_for_merges_custom() {
        let mut settings = UserSettings::default();
        settings.custom_categories = vec![
            CustomCategory::new("Pets", CategoryKind::Expense),
            CustomCategory::new("Rental", CategoryKind::Income),
            CustomCategory::new("Side Hustle", CategoryKind::Both),
            CustomCategory::new("food", CategoryKind::Expense),
        ];

        let expense = settings.categories_for(TransactionType::Expense);
        assert_eq!(expense[0], "Food");
        assert!(expense.contains(&"Pets".to_string()));
        assert!(expense.contains(&"Side Hustle".to_string()));
        assert!(!expense.contains(&"Rental".to_string()));
        assert!(!expense.contains(&"food".to_string()));

        let income = settings.categories_for(TransactionType::Income);
        assert!(income.contains(&"Rental".to_string()));
        assert!(!income.contains(&"Pets".to_string()));
    }

    #[test]
    fn test_apply_patch() {
        let mut settings = UserSettings::default();
        settings.apply(SettingsPatch {
            theme: Some(Theme::Dark),
            ..Default::default()
        });
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.currency_code, "INR");
    }

    #[test]
    fn test_custom_categories_must_be_named_and_unique() {
        let mut settings = UserSettings::default();
        settings.custom_categories = vec![CustomCategory::new(" ", CategoryKind::Expense)];
        assert!(settings.validate().unwrap_err().is_validation());

        settings.custom_categories = vec![
            CustomCategory::new("Pets", CategoryKind::Expense),
            CustomCategory::new("pets ", CategoryKind::Both),
        ];
        assert!(settings.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_retain_valid_categories() {
        let mut settings = UserSettings::default();
        settings.custom_categories = vec![
            CustomCategory::new("", CategoryKind::Expense),
            CustomCategory::new("Pets", CategoryKind::Expense),
            CustomCategory::new("PETS", CategoryKind::Income),
            CustomCategory::new("Rental", CategoryKind::Income),
        ];

        assert_eq!(settings.retain_valid_categories(), 2);
        let names: Vec<_> = settings.custom_categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pets", "Rental"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_blank_currency_rejected() {
        let mut settings = UserSettings::default();
        settings.currency_symbol = " ".into();
        assert!(settings.validate().unwrap_err().is_validation());
    }
}
