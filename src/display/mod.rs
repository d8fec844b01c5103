//! Display formatting
//!
//! Pure functions that turn amounts, dates and percentages into text using
//! the user's currency, locale and date preferences. Billing cycles format
//! themselves through their `Display` impl.

pub mod currency;
pub mod date;

pub use currency::{currency_decimals, format_compact, format_currency, format_percentage, NumberStyle};
pub use date::{format_date, format_window};
