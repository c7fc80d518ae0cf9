//! Request body posted to the GraphQL endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GraphQL variables, keyed by variable name (without the leading `$`).
///
/// Values are tagged JSON values so arbitrarily shaped inputs (strings, numbers, booleans,
/// null, lists and nested objects) can be passed without losing type information.
pub type Variables = Map<String, Value>;

/// A GraphQL request as sent over http: `{"query": ..., "variables": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    /// The GraphQL document.
    pub query: String,

    /// Variables referenced by the document. Always serialized, as an empty object if unused.
    #[serde(default)]
    pub variables: Variables,
}

impl GraphqlRequest {
    /// Create a request with no variables.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Variables::new(),
        }
    }

    /// Add or replace a variable.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_query_and_variables() {
        let req = GraphqlRequest::new("{ viewer { homes { id } } }").variable("homeId", "123");
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(
            value,
            json!({
                "query": "{ viewer { homes { id } } }",
                "variables": { "homeId": "123" },
            })
        );
    }

    #[test]
    fn empty_variables_are_an_object() {
        let value = serde_json::to_value(GraphqlRequest::new("{ viewer { name } }")).unwrap();
        assert_eq!(value["variables"], json!({}));
    }

    #[test]
    fn variables_keep_their_shape() {
        let req = GraphqlRequest::new("query")
            .variable("first", 24)
            .variable("resolution", Value::Null)
            .variable("filter", json!({ "levels": ["CHEAP", "VERY_CHEAP"], "strict": true }));

        assert!(req.variables["first"].is_number());
        assert!(req.variables["resolution"].is_null());
        assert_eq!(req.variables["filter"]["levels"][1], "VERY_CHEAP");
        assert_eq!(req.variables["filter"]["strict"], true);
    }
}
