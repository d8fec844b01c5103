//! Currency and number formatting
//!
//! Amounts are rendered from the user's currency and locale settings. The
//! locale picks a [`NumberStyle`]; the currency code picks how many decimal
//! places are shown.

use crate::config::UserSettings;

/// Currencies without minor units
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "VND", "CLP", "ISK", "HUF"];

/// Languages that group with `.` and use `,` for decimals
const DOT_COMMA_LANGUAGES: &[&str] = &["de", "es", "it", "nl", "pt", "id", "tr"];

/// Languages that group with a space and use `,` for decimals
const SPACE_COMMA_LANGUAGES: &[&str] = &["fr", "ru", "sv", "pl", "cs", "fi", "nb"];

const INDIAN_UNITS: &[(f64, &str)] = &[(1e7, "Cr"), (1e5, "L"), (1e3, "K")];
const WESTERN_UNITS: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Digit grouping and separator conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// 12,34,567.89
    Indian,
    /// 1,234,567.89
    CommaDot,
    /// 1.234.567,89 with the symbol after the number
    DotComma,
    /// 1 234 567,89 with the symbol after the number
    SpaceComma,
}

impl NumberStyle {
    /// Style for a locale tag such as `en-IN` or `de_DE`
    pub fn for_locale(locale: &str) -> Self {
        let mut parts = locale.split(|c| c == '-' || c == '_');
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().unwrap_or_default();

        if region.eq_ignore_ascii_case("IN") {
            Self::Indian
        } else if DOT_COMMA_LANGUAGES.contains(&language.as_str()) {
            Self::DotComma
        } else if SPACE_COMMA_LANGUAGES.contains(&language.as_str()) {
            Self::SpaceComma
        } else {
            Self::CommaDot
        }
    }

    pub fn group_separator(&self) -> &'static str {
        match self {
            Self::Indian | Self::CommaDot => ",",
            Self::DotComma => ".",
            Self::SpaceComma => " ",
        }
    }

    pub fn decimal_separator(&self) -> &'static str {
        match self {
            Self::Indian | Self::CommaDot => ".",
            Self::DotComma | Self::SpaceComma => ",",
        }
    }

    /// Whether the currency symbol follows the number
    pub fn symbol_after(&self) -> bool {
        matches!(self, Self::DotComma | Self::SpaceComma)
    }

    fn is_indian(&self) -> bool {
        *self == Self::Indian
    }

    /// Insert group separators into a run of integer digits
    fn group(&self, digits: &str) -> String {
        let chars: Vec<char> = digits.chars().collect();
        let mut groups: Vec<String> = Vec::new();
        let mut end = chars.len();
        let mut size = 3;

        while end > 0 {
            let start = end.saturating_sub(size);
            groups.push(chars[start..end].iter().collect());
            end = start;
            if self.is_indian() {
                size = 2;
            }
        }

        groups.reverse();
        groups.join(self.group_separator())
    }
}

/// Decimal places shown for a currency code
pub fn currency_decimals(currency_code: &str) -> usize {
    if ZERO_DECIMAL_CURRENCIES
        .iter()
        .any(|code| code.eq_ignore_ascii_case(currency_code))
    {
        0
    } else {
        2
    }
}

/// Non-finite values render as zero
fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// True when `text` holds at least one non-zero digit
fn has_value(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit() && c != '0')
}

fn with_symbol(negative: bool, number: &str, style: NumberStyle, symbol: &str) -> String {
    let sign = if negative { "-" } else { "" };
    if style.symbol_after() {
        format!("{}{} {}", sign, number, symbol)
    } else {
        format!("{}{}{}", sign, symbol, number)
    }
}

/// Format an amount with the configured currency symbol and locale grouping
pub fn format_currency(amount: f64, settings: &UserSettings) -> String {
    let amount = finite(amount);
    let style = NumberStyle::for_locale(&settings.locale);
    let decimals = currency_decimals(&settings.currency_code);

    let fixed = format!("{:.*}", decimals, amount.abs());
    let number = match fixed.split_once('.') {
        Some((whole, fraction)) => {
            format!("{}{}{}", style.group(whole), style.decimal_separator(), fraction)
        }
        None => style.group(&fixed),
    };

    // Rounds-to-zero amounts lose their sign
    let negative = amount < 0.0 && has_value(&fixed);
    with_symbol(negative, &number, style, &settings.currency_symbol)
}

/// Format an amount in short notation such as `₹1.5L` or `$2.3M`
///
/// Magnitudes below one thousand use [`format_currency`].
pub fn format_compact(amount: f64, settings: &UserSettings) -> String {
    let amount = finite(amount);
    let magnitude = amount.abs();
    if magnitude < 1e3 {
        return format_currency(amount, settings);
    }

    let style = NumberStyle::for_locale(&settings.locale);
    let units = if style.is_indian() {
        INDIAN_UNITS
    } else {
        WESTERN_UNITS
    };

    let mut index = units
        .iter()
        .position(|(threshold, _)| magnitude >= *threshold)
        .unwrap_or(units.len() - 1);

    // 999,990 rounds to 1000.0K, which reads better as 1M
    let rounded = round_tenth(magnitude / units[index].0);
    if index > 0 && rounded * units[index].0 >= units[index - 1].0 {
        index -= 1;
    }

    let (threshold, suffix) = units[index];
    let mut scaled = format!("{:.1}", round_tenth(magnitude / threshold));
    if scaled.ends_with(".0") {
        scaled.truncate(scaled.len() - 2);
    }
    let number = format!(
        "{}{}",
        scaled.replace('.', style.decimal_separator()),
        suffix
    );

    with_symbol(amount < 0.0, &number, style, &settings.currency_symbol)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a percentage with one decimal place
pub fn format_percentage(value: f64) -> String {
    let text = format!("{:.1}", finite(value).abs());
    if value < 0.0 && has_value(&text) {
        format!("-{}%", text)
    } else {
        format!("{}%", text)
    }
}
