//! Connection over http using reqwest.
//!
//! You will usually pretty much immediately turn the connection into a Client.
//! E.g.
//! ```rust
//! use powerctl::{http::Connection, Auth};
//! let client = Connection::new(Auth::access_token("<TIBBER_TOKEN>"))?.into_client();
//! # Ok::<(), powerctl::Error>(())
//! ```

use crate::{Auth, Client, Error, QueryConn};
use graphql_client::GraphQLQuery;
use powerctl_protocol::{GraphqlRequest, Variables};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

/// The production Tibber GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.tibber.com/v1-beta/gql";

#[derive(Debug)]
struct Config {
    user_agent: String,
    timeout: Duration,
    api_url: String,
    cancellation: Option<CancellationToken>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_agent: format!("powerctl/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            api_url: String::from(DEFAULT_API_URL),
            cancellation: None,
        }
    }
}

/// Configure and build an http [`Connection`].
///
/// ## Usage:
/// ```rust
/// # use powerctl::{http::Connection, Auth};
/// let connection = Connection::builder()
///     .user_agent("My App / 0.1.0")
///     .build(Auth::access_token("<TIBBER_TOKEN>"))?;
/// # Ok::<(), powerctl::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ConnectionBuilder {
    config: Config,
}

impl ConnectionBuilder {
    /// Build the http connection from the set options.
    ///
    /// # Errors
    /// This function errors if the TLS backend cannot be initialized.
    pub fn build(self, auth: Auth) -> Result<Connection, Error> {
        let http = reqwest::Client::builder()
            .user_agent(self.config.user_agent)
            .timeout(self.config.timeout)
            .build()
            .map_err(Error::Transport)?;

        Ok(Connection {
            http,
            auth: Arc::new(auth),
            api_url: Arc::new(self.config.api_url),
            cancellation: self.config.cancellation,
        })
    }

    /// Set the user agent the http client will identify itself as.
    ///
    /// This defaults to `powerctl/x.x.x` where `x.x.x` is the version of this package.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    /// Set the timeout for requests made to the api, covering connect, send and reading the
    /// response. An expired timeout surfaces as [`Error::Timeout`].
    ///
    /// The default is 30 seconds
    pub fn timeout(mut self, value: Duration) -> Self {
        self.config.timeout = value;
        self
    }

    /// Set the api url used for requests.
    /// Useful for pointing at a mock server for example.
    ///
    /// Defaults to [`DEFAULT_API_URL`]
    pub fn api_url(mut self, value: impl Into<String>) -> Self {
        self.config.api_url = value.into();
        self
    }

    /// Abort in-flight requests when `token` is cancelled. Aborted requests
    /// surface as [`Error::Cancelled`].
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.config.cancellation = Some(token);
        self
    }
}

/// Connect to the Tibber api over http(s).
#[derive(Debug, Clone)]
pub struct Connection {
    http: reqwest::Client,
    auth: Arc<Auth>,
    api_url: Arc<String>,
    cancellation: Option<CancellationToken>,
}

impl Connection {
    /// Create a [`ConnectionBuilder`] to configure various options.
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::default()
    }

    /// Create a connection with the default options.
    ///
    /// # Errors
    /// See [`ConnectionBuilder::build`]
    pub fn new(auth: Auth) -> Result<Self, Error> {
        ConnectionBuilder::default().build(auth)
    }

    /// The url requests are posted to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The authentication applied to every request.
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a client with reference to this connection
    pub fn as_client(&self) -> Client<&Self> {
        Client::from_connection(self)
    }

    /// Create a client with a clone of this connection
    pub fn to_client(&self) -> Client<Self> {
        Client::from_connection(self.clone())
    }

    /// Convert this connection into a client
    pub fn into_client(self) -> Client<Self> {
        Client::from_connection(self)
    }

    async fn request<Q>(&self, variables: Variables) -> Result<Q::ResponseData, Error>
    where
        Q: GraphQLQuery<Variables = Variables>,
    {
        match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(Error::Cancelled),
                res = self.send::<Q>(variables) => res,
            },
            None => self.send::<Q>(variables).await,
        }
    }

    async fn send<Q>(&self, variables: Variables) -> Result<Q::ResponseData, Error>
    where
        Q: GraphQLQuery<Variables = Variables>,
    {
        let body = Q::build_query(variables);
        let request = GraphqlRequest {
            query: body.query.to_owned(),
            variables: body.variables,
        };
        tracing::debug!(
            operation = body.operation_name,
            url = %self.api_url,
            "sending graphql request"
        );

        let req = self.http.post(self.api_url.as_str()).json(&request);
        let res = self
            .auth
            .apply(req)
            .send()
            .await
            .map_err(Error::from_reqwest)?;

        let status = res.status();
        if !status.is_success() {
            let body = match res.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::debug!(%status, error = %err, "failed to read error response body");
                    String::new()
                }
            };
            tracing::debug!(%status, "bad status from api");
            return Err(Error::BadStatus { status, body });
        }

        let bytes = res.bytes().await.map_err(Error::from_reqwest)?;
        let res: graphql_client::Response<serde_json::Value> =
            serde_json::from_slice(&bytes).map_err(Error::Decode)?;

        if let Some(errs) = res.errors {
            if !errs.is_empty() {
                tracing::warn!(
                    operation = body.operation_name,
                    count = errs.len(),
                    first = %errs[0].message,
                    "api returned graphql errors"
                );
                return Err(Error::Graphql(errs));
            }
        }

        match res.data {
            None | Some(serde_json::Value::Null) => Err(Error::NoData),
            Some(data) => serde_json::from_value(data).map_err(Error::Decode),
        }
    }
}

#[async_trait]
impl QueryConn for Connection {
    type Error = Error;

    async fn query<Q>(&self, variables: Variables) -> Result<Q::ResponseData, Self::Error>
    where
        Q: GraphQLQuery<Variables = Variables>,
    {
        self.request::<Q>(variables).await
    }
}
