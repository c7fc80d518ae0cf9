//! Price information for a home's current subscription.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prices for the current hour, today and tomorrow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    /// The price right now. May be absent even when a subscription exists.
    #[serde(default)]
    pub current: Option<PricePoint>,

    /// Today's prices, in chronological order.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub today: Vec<PricePoint>,

    /// Tomorrow's prices, in chronological order. Empty until published (usually early afternoon).
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub tomorrow: Vec<PricePoint>,
}

/// A single time-bound price quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Total price including taxes and fees.
    pub total: f64,
    /// Spot price part of the total.
    pub energy: f64,
    /// Tax part of the total.
    pub tax: f64,
    /// Start of the period this price applies to.
    pub starts_at: Timestamp,
    /// Price level relative to the trailing average.
    pub level: PriceLevel,
    /// ISO 4217 currency code, e.g. `NOK`.
    pub currency: String,
}

/// Qualitative price band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLevel {
    /// Price is at or below 60% of the trailing average.
    VeryCheap,
    /// Price is between 60% and 90% of the trailing average.
    Cheap,
    /// Price is between 90% and 115% of the trailing average.
    Normal,
    /// Price is between 115% and 140% of the trailing average.
    Expensive,
    /// Price is at or above 140% of the trailing average.
    VeryExpensive,
    /// A level this version does not know about.
    #[serde(other)]
    Unknown,
}

impl PriceLevel {
    /// The api's name for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryCheap => "VERY_CHEAP",
            Self::Cheap => "CHEAP",
            Self::Normal => "NORMAL",
            Self::Expensive => "EXPENSIVE",
            Self::VeryExpensive => "VERY_EXPENSIVE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PriceInfo {
    /// Today's and tomorrow's prices, in chronological order.
    pub fn upcoming(&self) -> impl Iterator<Item = &PricePoint> {
        self.today.iter().chain(self.tomorrow.iter())
    }

    /// The cheapest known price point, today or tomorrow.
    pub fn cheapest(&self) -> Option<&PricePoint> {
        self.upcoming().min_by(|a, b| a.total.total_cmp(&b.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(total: f64, level: &str) -> serde_json::Value {
        json!({
            "total": total,
            "energy": total - 0.1,
            "tax": 0.1,
            "startsAt": "2024-01-15T13:00:00.000+01:00",
            "level": level,
            "currency": "NOK"
        })
    }

    #[test]
    fn decodes_price_info() {
        let info: PriceInfo = serde_json::from_value(json!({
            "current": point(0.45, "NORMAL"),
            "today": [point(0.40, "CHEAP"), point(0.30, "VERY_CHEAP")],
            "tomorrow": []
        }))
        .unwrap();

        let current = info.current.as_ref().unwrap();
        assert_eq!(current.total, 0.45);
        assert_eq!(current.level, PriceLevel::Normal);
        assert_eq!(current.level.to_string(), "NORMAL");
        assert_eq!(info.today.len(), 2);
        assert!(info.tomorrow.is_empty());
        assert_eq!(info.cheapest().unwrap().level, PriceLevel::VeryCheap);
    }

    #[test]
    fn null_lists_are_empty() {
        let info: PriceInfo = serde_json::from_value(json!({
            "current": null,
            "today": null,
            "tomorrow": null
        }))
        .unwrap();

        assert_eq!(info, PriceInfo::default());
        assert!(info.cheapest().is_none());
    }

    #[test]
    fn unknown_level_is_preserved_as_unknown() {
        let level: PriceLevel = serde_json::from_value(json!("EXTREMELY_EXPENSIVE")).unwrap();
        assert_eq!(level, PriceLevel::Unknown);
    }
}
