use std::path::PathBuf;

/// Errors that can occur when interacting with the Tibber API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response could not be read,
    /// e.g. a dns resolution failure or a dropped connection.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The request was cancelled by the caller before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// A request returned a bad status code. This may happen if the token
    /// was wrong for example.
    #[error("HTTP error: {status}")]
    BadStatus {
        /// Status returned by the api.
        status: reqwest::StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// A list of errors returned by graphql.
    /// This is guaranteed to always have at least one error, only the first is displayed.
    #[error("GraphQL error: {}", first_message(.0))]
    Graphql(Vec<graphql_client::Error>),

    /// The graphql response contained no errors, but null data.
    #[error("Missing response data")]
    NoData,

    /// The response body did not match the shape of the query.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The home exists but has no subscription, or the subscription has no price information.
    #[error("no price information available for home {0}")]
    NoPriceInfo(String),

    /// No home with the given id is visible to the token.
    #[error("home {0} not found")]
    HomeNotFound(String),
}

fn first_message(errors: &[graphql_client::Error]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or_default()
}

impl Error {
    /// Network failure, timeout or cancellation: no response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout | Self::Cancelled)
    }

    /// The api answered with a non-success http status.
    pub fn is_http(&self) -> bool {
        matches!(self, Self::BadStatus { .. })
    }

    /// The api answered successfully but reported graphql errors.
    pub fn is_graphql(&self) -> bool {
        matches!(self, Self::Graphql(_))
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML or has unexpected keys.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying yaml error.
        #[source]
        source: serde_yaml::Error,
    },

    /// No token was found in any config source.
    #[error("missing token: set TIBBER_TOKEN or add `token` to the config file")]
    MissingToken,
}
