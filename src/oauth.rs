use std::time::Duration;

use oauth2::{
    EndpointNotSet, EndpointSet, RefreshToken, StandardRevocableToken,
    basic::{BasicTokenIntrospectionResponse, BasicTokenType},
};
use serde::{Deserialize, Serialize};

use crate::error;

/// Stores the OAuth 2 client ID and client secret.
#[derive(Debug, Clone)]
pub struct KeyPair(
    pub(crate) oauth2::ClientId,
    pub(crate) Option<oauth2::ClientSecret>,
);

impl KeyPair {
    /// Creates a new `KeyPair` from the provided `client_id` and `client_secret` strings.
    #[must_use]
    pub fn new(client_id: String, client_secret: Option<String>) -> Self {
        Self(
            oauth2::ClientId::new(client_id),
            client_secret.map(oauth2::ClientSecret::new),
        )
    }

    /// Creates a new `KeyPair` from `XERO_CLIENT_ID` and `XERO_CLIENT_SECRET` environment variables.
    ///
    /// A missing `XERO_CLIENT_ID` yields an empty client id, which is then reported by
    /// [`Config::diagnostics`](crate::Config::diagnostics) rather than panicking here.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("XERO_CLIENT_ID").unwrap_or_default(),
            std::env::var("XERO_CLIENT_SECRET").ok(),
        )
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn has_secret(&self) -> bool {
        self.1
            .as_ref()
            .is_some_and(|secret| !secret.secret().is_empty())
    }
}

/// An OAuth client with Xero's authorize and token endpoints configured.
pub type OAuthClient = oauth2::Client<
    error::OAuth2ErrorResponse,
    TokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    error::OAuth2ErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    access_token: oauth2::AccessToken,
    expires_in: u64,
    token_type: BasicTokenType,
    refresh_token: Option<RefreshToken>,
}

impl oauth2::TokenResponse for TokenResponse {
    type TokenType = BasicTokenType;

    fn access_token(&self) -> &oauth2::AccessToken {
        &self.access_token
    }

    fn token_type(&self) -> &BasicTokenType {
        &self.token_type
    }

    fn expires_in(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.expires_in))
    }

    fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }

    fn scopes(&self) -> Option<&Vec<oauth2::Scope>> {
        None
    }
}
