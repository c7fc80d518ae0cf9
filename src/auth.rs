use reqwest::RequestBuilder;
use std::fmt;

/// Authentication method.
/// The Tibber API authenticates every request with a personal access token,
/// sent as a bearer token.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// Use Bearer authentication.
    /// The supplied access token is assumed to be valid, an invalid token is
    /// reported by the api on the first request.
    AccessToken(String),
}

impl Auth {
    /// Use Bearer authentication with the given personal access token.
    pub fn access_token(access_token: impl Into<String>) -> Self {
        Self::AccessToken(access_token.into())
    }

    pub(crate) fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Auth::AccessToken(access_token) => req.bearer_auth(access_token),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::AccessToken(_) => f.debug_tuple("AccessToken").field(&"<redacted>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_leak_token() {
        let auth = Auth::access_token("super-secret");
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("AccessToken"));
    }
}
