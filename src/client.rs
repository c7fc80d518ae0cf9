use crate::{
    conn::QueryConn,
    queries::{price_info_query, HomesQuery, PriceInfoQuery},
    Error,
};
use graphql_client::GraphQLQuery;
use powerctl_protocol::{Home, PriceInfo, Variables};
use std::fmt::Debug;

/// Tibber client.
/// The client is generic over its connection/transport, meaning a mock transport can stand in
/// for http in tests.
///
/// Use [`Client::new`] for an http client with default options, or create the underlying
/// connection first, such as [`crate::http::Connection`], to configure it.
pub struct Client<T> {
    conn: T,
}

#[cfg(feature = "http")]
impl Client<crate::http::Connection> {
    /// Create an http client for the production api authenticated with `token`.
    ///
    /// # Errors
    /// See [`crate::http::ConnectionBuilder::build`]
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        crate::http::Connection::new(crate::Auth::access_token(token)).map(Self::from_connection)
    }
}

impl<T> Client<T> {
    /// Create a new client from a connection. Prefer calling `into_client` on the connection itself.
    pub fn from_connection(conn: T) -> Self {
        Self { conn }
    }

    /// The underlying connection
    pub fn connection(&self) -> &T {
        &self.conn
    }

    /// Turn this client back into its underlying connection
    pub fn into_connection(self) -> T {
        self.conn
    }
}

impl<T: Clone> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

impl<T: Debug> Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("conn", &self.conn).finish()
    }
}

impl<T> Client<T>
where
    T: QueryConn,
{
    /// Perform a graphql query using the underlying connection.
    ///
    /// # Errors
    /// See [`QueryConn::query`] for error information
    pub async fn query<Q>(&self, variables: Variables) -> Result<Q::ResponseData, T::Error>
    where
        Q: GraphQLQuery<Variables = Variables>,
    {
        self.conn.query::<Q>(variables).await
    }
}

impl<T> Client<T>
where
    T: QueryConn<Error = Error>,
{
    /// List every home visible to the token, in the order the api returns them.
    ///
    /// # Errors
    /// See [`QueryConn::query`] for error information
    pub async fn get_homes(&self) -> Result<Vec<Home>, Error> {
        let data = self.query::<HomesQuery>(Variables::new()).await?;
        tracing::debug!(count = data.viewer.homes.len(), "fetched homes");
        Ok(data.viewer.homes)
    }

    /// Fetch current, today's and tomorrow's prices for the home with id `home_id`.
    ///
    /// `current` may be `None` when the api has no price for this hour, that is not an error.
    ///
    /// # Errors
    /// Besides the errors described in [`QueryConn::query`], this returns
    /// [`Error::HomeNotFound`] if no home has that id, and [`Error::NoPriceInfo`]
    /// if the home has no active subscription.
    pub async fn get_prices(&self, home_id: &str) -> Result<PriceInfo, Error> {
        let data = self
            .query::<PriceInfoQuery>(price_info_query::variables(home_id))
            .await?;

        let home = data
            .viewer
            .homes
            .into_iter()
            .find(|h| h.id == home_id)
            .ok_or_else(|| Error::HomeNotFound(home_id.to_owned()))?;

        let prices = home
            .current_subscription
            .and_then(|s| s.price_info)
            .ok_or_else(|| Error::NoPriceInfo(home_id.to_owned()))?;

        tracing::debug!(
            home_id,
            today = prices.today.len(),
            tomorrow = prices.tomorrow.len(),
            has_current = prices.current.is_some(),
            "fetched prices"
        );
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Answers every query with a canned `data` payload.
    struct StaticConn(Value);

    #[async_trait]
    impl QueryConn for StaticConn {
        type Error = Error;

        async fn query<Q>(&self, _variables: Variables) -> Result<Q::ResponseData, Self::Error>
        where
            Q: GraphQLQuery<Variables = Variables>,
        {
            serde_json::from_value(self.0.clone()).map_err(Error::Decode)
        }
    }

    fn client(data: Value) -> Client<StaticConn> {
        Client::from_connection(StaticConn(data))
    }

    #[tokio::test]
    async fn homes_keep_server_order() {
        let homes = client(json!({
            "viewer": { "homes": [{ "id": "b" }, { "id": "a" }, { "id": "c" }] }
        }))
        .get_homes()
        .await
        .unwrap();

        let ids: Vec<_> = homes.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn prices_match_requested_home() {
        let prices = client(json!({
            "viewer": { "homes": [
                { "id": "other", "currentSubscription": null },
                { "id": "home-123", "currentSubscription": { "priceInfo": {
                    "current": null, "today": [], "tomorrow": null
                } } }
            ] }
        }))
        .get_prices("home-123")
        .await
        .unwrap();

        assert!(prices.current.is_none());
        assert!(prices.today.is_empty());
    }

    #[tokio::test]
    async fn unknown_home_is_not_found() {
        let err = client(json!({ "viewer": { "homes": [{ "id": "home-123" }] } }))
            .get_prices("nope")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::HomeNotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn missing_price_info_is_no_price_info() {
        let err = client(json!({ "viewer": { "homes": [
            { "id": "home-123", "currentSubscription": { "priceInfo": null } }
        ] } }))
        .get_prices("home-123")
        .await
        .unwrap_err();

        assert!(matches!(err, Error::NoPriceInfo(_)));
    }
}
