//! Date display formatting

use chrono::NaiveDate;

use crate::config::UserSettings;
use crate::models::PeriodWindow;

/// Format a date using the preferred date format
pub fn format_date(date: NaiveDate, settings: &UserSettings) -> String {
    date.format(settings.date_format.pattern()).to_string()
}

/// Format a window as `start - end` in the preferred date format
pub fn format_window(window: &PeriodWindow, settings: &UserSettings) -> String {
    format!(
        "{} - {}",
        format_date(window.start, settings),
        format_date(window.end, settings)
    )
}
