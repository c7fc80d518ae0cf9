//! Home metadata as returned by `viewer.homes`.

use serde::{Deserialize, Serialize};

/// A home registered to the authenticated user.
///
/// Apart from `id` every field is nullable in the api schema, so they are optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    /// Stable home identifier, used to query prices.
    pub id: String,

    /// The nickname given to the home in the Tibber app.
    #[serde(default)]
    pub app_nickname: Option<String>,

    /// Size of the home in square meters.
    #[serde(default)]
    pub size: Option<u32>,

    /// Home type, e.g. `APARTMENT` or `HOUSE`.
    #[serde(default, rename = "type")]
    pub home_type: Option<String>,

    /// Feature flags for the home.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub features: HomeFeatures,

    /// Postal address of the home.
    #[serde(default)]
    pub address: Option<Address>,
}

/// Feature flags for a [`Home`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFeatures {
    /// Whether a real time meter (e.g. Pulse) is streaming consumption for this home.
    #[serde(default)]
    pub real_time_consumption_enabled: bool,
}

/// Postal address of a [`Home`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street address.
    #[serde(default)]
    pub address1: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,
}

impl Home {
    /// Nickname if set, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.app_nickname.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_home() {
        let home: Home = serde_json::from_value(json!({
            "id": "home-123",
            "appNickname": "Test Home",
            "size": 100,
            "type": "APARTMENT",
            "features": { "realTimeConsumptionEnabled": true },
            "address": {
                "address1": "123 Test St",
                "postalCode": "12345",
                "city": "Oslo",
                "country": "Norway"
            }
        }))
        .unwrap();

        assert_eq!(home.id, "home-123");
        assert_eq!(home.size, Some(100));
        assert_eq!(home.home_type.as_deref(), Some("APARTMENT"));
        assert!(home.features.real_time_consumption_enabled);
        assert_eq!(home.address.unwrap().postal_code.as_deref(), Some("12345"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let home: Home = serde_json::from_value(json!({ "id": "bare", "features": null, "address": null })).unwrap();

        assert_eq!(home.display_name(), "bare");
        assert!(!home.features.real_time_consumption_enabled);
        assert!(home.address.is_none());
    }
}
