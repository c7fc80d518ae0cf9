use graphql_client::GraphQLQuery;
use powerctl_protocol::Variables;

#[cfg(feature = "http")]
pub mod http;

/// Connections that implement this support graphql queries.
#[async_trait]
pub trait QueryConn {
    /// Error type representing any errors that can occur when querying
    type Error;

    /// Send a graphql query over this connection.
    ///
    /// # Errors
    /// This function may error if there was a problem with the underlying connection such as
    /// a dns resolution error or a timeout, if the api returned a bad status or graphql errors,
    /// or if the api response failed to decode.
    async fn query<Q>(&self, variables: Variables) -> Result<Q::ResponseData, Self::Error>
    where
        Q: GraphQLQuery<Variables = Variables>;
}

#[async_trait]
impl<T> QueryConn for &T
where
    T: QueryConn + Sync,
{
    type Error = T::Error;

    async fn query<Q>(&self, variables: Variables) -> Result<Q::ResponseData, Self::Error>
    where
        Q: GraphQLQuery<Variables = Variables>,
    {
        (**self).query::<Q>(variables).await
    }
}
