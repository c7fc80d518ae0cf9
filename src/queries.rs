//! GraphQL operations sent to the api, and the shape of their `data` payloads.
//!
//! These implement [`GraphQLQuery`] by hand rather than through the derive, the documents are
//! small enough that carrying the full api schema around isn't worth it.

use graphql_client::{GraphQLQuery, QueryBody};
use powerctl_protocol::{de::null_as_default, Home, PriceInfo, Variables};
use serde::Deserialize;

/// Lists every home visible to the token.
pub struct HomesQuery;

/// Price information for the current subscription of every home, filtered by id client side.
pub struct PriceInfoQuery;

const HOMES_QUERY: &str = r#"query Homes {
  viewer {
    homes {
      id
      appNickname
      size
      type
      features {
        realTimeConsumptionEnabled
      }
      address {
        address1
        postalCode
        city
        country
      }
    }
  }
}"#;

const PRICE_INFO_QUERY: &str = r#"query PriceInfo {
  viewer {
    homes {
      id
      currentSubscription {
        priceInfo {
          current { ...Price }
          today { ...Price }
          tomorrow { ...Price }
        }
      }
    }
  }
}

fragment Price on Price {
  total
  energy
  tax
  startsAt
  level
  currency
}"#;

impl GraphQLQuery for HomesQuery {
    type Variables = Variables;
    type ResponseData = homes_query::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: HOMES_QUERY,
            operation_name: "Homes",
        }
    }
}

impl GraphQLQuery for PriceInfoQuery {
    type Variables = Variables;
    type ResponseData = price_info_query::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: PRICE_INFO_QUERY,
            operation_name: "PriceInfo",
        }
    }
}

/// Response types for [`HomesQuery`].
pub mod homes_query {
    use super::*;

    #[allow(missing_docs)]
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub viewer: Viewer,
    }

    #[allow(missing_docs)]
    #[derive(Debug, Deserialize)]
    pub struct Viewer {
        #[serde(default, deserialize_with = "null_as_default")]
        pub homes: Vec<Home>,
    }
}

/// Response types for [`PriceInfoQuery`].
pub mod price_info_query {
    use super::*;

    #[allow(missing_docs)]
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub viewer: Viewer,
    }

    #[allow(missing_docs)]
    #[derive(Debug, Deserialize)]
    pub struct Viewer {
        #[serde(default, deserialize_with = "null_as_default")]
        pub homes: Vec<HomePrices>,
    }

    #[allow(missing_docs)]
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HomePrices {
        pub id: String,
        #[serde(default)]
        pub current_subscription: Option<Subscription>,
    }

    #[allow(missing_docs)]
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Subscription {
        #[serde(default)]
        pub price_info: Option<PriceInfo>,
    }

    /// Variables for a price lookup. The home is matched client side, the id is sent along so
    /// server logs show which home was asked for.
    pub fn variables(home_id: &str) -> Variables {
        let mut vars = Variables::new();
        vars.insert("homeId".to_owned(), home_id.into());
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn homes_query_selects_nested_fields() {
        let body = HomesQuery::build_query(Variables::new());
        assert_eq!(body.operation_name, "Homes");
        assert!(body.query.contains("realTimeConsumptionEnabled"));
        assert!(body.query.contains("postalCode"));
    }

    #[test]
    fn price_query_sends_home_id() {
        let body = PriceInfoQuery::build_query(price_info_query::variables("home-123"));
        assert_eq!(body.variables["homeId"], "home-123");
        assert!(body.query.contains("currentSubscription"));
        assert!(body.query.contains("tomorrow"));
    }

    #[test]
    fn null_homes_decode_as_empty() {
        let homes: homes_query::ResponseData =
            serde_json::from_value(json!({ "viewer": { "homes": null } })).unwrap();
        assert!(homes.viewer.homes.is_empty());

        let prices: price_info_query::ResponseData =
            serde_json::from_value(json!({ "viewer": { "homes": null } })).unwrap();
        assert!(prices.viewer.homes.is_empty());
    }

    #[test]
    fn null_subscription_decodes() {
        let data: price_info_query::ResponseData = serde_json::from_value(json!({
            "viewer": { "homes": [{ "id": "home-123", "currentSubscription": null }] }
        }))
        .unwrap();

        assert_eq!(data.viewer.homes[0].id, "home-123");
        assert!(data.viewer.homes[0].current_subscription.is_none());
    }
}
