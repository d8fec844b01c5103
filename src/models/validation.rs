//! Shared field checks used by the entity models

use crate::error::{TrackerError, TrackerResult};

pub(crate) fn require_text(field: &str, value: &str) -> TrackerResult<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

pub(crate) fn require_finite(field: &str, value: f64) -> TrackerResult<()> {
    if !value.is_finite() {
        return Err(TrackerError::validation(format!("{} must be a finite number", field)));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: f64) -> TrackerResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(TrackerError::validation(format!("{} must be greater than zero", field)));
    }
    Ok(())
}

/// Accepts `#rgb` and `#rrggbb`
pub(crate) fn require_color(value: &str) -> TrackerResult<()> {
    let valid = value
        .strip_prefix('#')
        .map(|hex| (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false);

    if !valid {
        return Err(TrackerError::validation(format!(
            "color must be a hex value like #22c55e, got '{}'",
            value
        )));
    }
    Ok(())
}
