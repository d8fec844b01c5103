//! Icon identifiers for budgets and subscriptions
//!
//! Icons are a closed set of known identifiers. They serialize as kebab-case
//! names; any name this build does not know rehydrates as [`Icon::Circle`] so
//! that old or foreign data still loads.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    ShoppingCart,
    Utensils,
    Coffee,
    Car,
    Fuel,
    Home,
    Zap,
    Wifi,
    Smartphone,
    Tv,
    Film,
    Music,
    Gamepad,
    Book,
    GraduationCap,
    Heart,
    Dumbbell,
    Plane,
    Gift,
    Briefcase,
    CreditCard,
    Wallet,
    PiggyBank,
    Cloud,
    #[default]
    #[serde(other)]
    Circle,
}

impl Icon {
    /// All known icons, in picker order
    pub fn all() -> &'static [Icon] {
        &[
            Self::ShoppingCart,
            Self::Utensils,
            Self::Coffee,
            Self::Car,
            Self::Fuel,
            Self::Home,
            Self::Zap,
            Self::Wifi,
            Self::Smartphone,
            Self::Tv,
            Self::Film,
            Self::Music,
            Self::Gamepad,
            Self::Book,
            Self::GraduationCap,
            Self::Heart,
            Self::Dumbbell,
            Self::Plane,
            Self::Gift,
            Self::Briefcase,
            Self::CreditCard,
            Self::Wallet,
            Self::PiggyBank,
            Self::Cloud,
            Self::Circle,
        ]
    }

    /// Serialized identifier
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShoppingCart => "shopping-cart",
            Self::Utensils => "utensils",
            Self::Coffee => "coffee",
            Self::Car => "car",
            Self::Fuel => "fuel",
            Self::Home => "home",
            Self::Zap => "zap",
            Self::Wifi => "wifi",
            Self::Smartphone => "smartphone",
            Self::Tv => "tv",
            Self::Film => "film",
            Self::Music => "music",
            Self::Gamepad => "gamepad",
            Self::Book => "book",
            Self::GraduationCap => "graduation-cap",
            Self::Heart => "heart",
            Self::Dumbbell => "dumbbell",
            Self::Plane => "plane",
            Self::Gift => "gift",
            Self::Briefcase => "briefcase",
            Self::CreditCard => "credit-card",
            Self::Wallet => "wallet",
            Self::PiggyBank => "piggy-bank",
            Self::Cloud => "cloud",
            Self::Circle => "circle",
        }
    }

    /// Glyph used when rendering in a terminal
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::ShoppingCart => "🛒",
            Self::Utensils => "🍴",
            Self::Coffee => "☕",
            Self::Car => "🚗",
            Self::Fuel => "⛽",
            Self::Home => "🏠",
            Self::Zap => "⚡",
            Self::Wifi => "📶",
            Self::Smartphone => "📱",
            Self::Tv => "📺",
            Self::Film => "🎬",
            Self::Music => "🎵",
            Self::Gamepad => "🎮",
            Self::Book => "📚",
            Self::GraduationCap => "🎓",
            Self::Heart => "❤",
            Self::Dumbbell => "🏋",
            Self::Plane => "✈",
            Self::Gift => "🎁",
            Self::Briefcase => "💼",
            Self::CreditCard => "💳",
            Self::Wallet => "👛",
            Self::PiggyBank => "🐷",
            Self::Cloud => "☁",
            Self::Circle => "●",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
