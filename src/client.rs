use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};

use oauth2::{AccessToken, AuthorizationCode, CsrfToken, RefreshToken, TokenResponse};
use reqwest::{Method, header};
use url::Url;
use uuid::Uuid;

use crate::{
    config::Config,
    endpoints::ApiSection,
    error::{Error, Result},
    filter::IF_MODIFIED_SINCE,
    oauth::{KeyPair, OAuthClient},
    scope::Scope,
    service::{Format, RemoteResponse, RemoteService},
};

const XERO_AUTH_URL: &str = "https://login.xero.com/identity/connect/authorize";
const XERO_TOKEN_URL: &str = "https://identity.xero.com/connect/token";

/// Header containing number of remaining daily API calls
const HEADER_DAY_LIMIT_REMAINING: &str = "X-DayLimit-Remaining";
/// Header containing number of remaining per-minute API calls
const HEADER_MIN_LIMIT_REMAINING: &str = "X-MinLimit-Remaining";
/// Header containing number of remaining app-wide per-minute API calls
const HEADER_APP_MIN_LIMIT_REMAINING: &str = "X-AppMinLimit-Remaining";

/// Information about the remaining API rate limits
///
/// Xero applies several rate limits to API usage:
/// - Daily limit: 5000 calls per day per tenant
/// - Minute limit: 60 calls per minute per tenant
/// - App minute limit: 10,000 calls per minute across all tenants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub day_limit_remaining: Option<u32>,
    pub minute_limit_remaining: Option<u32>,
    pub app_minute_limit_remaining: Option<u32>,
}

impl RateLimitInfo {
    fn from_response_headers(headers: &header::HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u32>().ok())
        };
        Self {
            day_limit_remaining: read(HEADER_DAY_LIMIT_REMAINING),
            minute_limit_remaining: read(HEADER_MIN_LIMIT_REMAINING),
            app_minute_limit_remaining: read(HEADER_APP_MIN_LIMIT_REMAINING),
        }
    }

    /// Returns true if any of the limits are close to being exhausted
    #[must_use]
    pub fn is_near_limit(&self) -> bool {
        self.day_limit_remaining.is_some_and(|v| v < 100)
            || self.minute_limit_remaining.is_some_and(|v| v < 10)
            || self.app_minute_limit_remaining.is_some_and(|v| v < 100)
    }

    fn log_if_near_limit(&self) {
        if self.is_near_limit() {
            warn!(
                day = ?self.day_limit_remaining,
                minute = ?self.minute_limit_remaining,
                app_minute = ?self.app_minute_limit_remaining,
                "approaching Xero API rate limits"
            );
        }
    }
}

/// The HTTP [`RemoteService`]: bearer authentication, tenant selection and transport.
///
/// ```no_run
/// use xero_models::{Client, Config, Filter, Scope, entities::{Entity, invoice::Invoice}};
///
/// # async fn run() -> xero_models::Result<()> {
/// let config = Config::from_env()?;
/// let client = Client::from_client_credentials(config, Scope::all_accounting()).await?;
/// let invoices = Invoice::get(&client, &Filter::new().r#where("Status", "DRAFT")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    config: Config,
    base_url: Url,
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
    http: reqwest::Client,
    rate_limit_info: Arc<Mutex<RateLimitInfo>>,
}

impl Client {
    fn build_oauth_client(key_pair: KeyPair) -> Result<OAuthClient> {
        let invalid = |e: url::ParseError| Error::InvalidConfiguration {
            diagnostics: vec![e.to_string()],
        };
        let client = oauth2::Client::new(key_pair.0)
            .set_auth_uri(oauth2::AuthUrl::new(XERO_AUTH_URL.to_string()).map_err(invalid)?)
            .set_token_uri(oauth2::TokenUrl::new(XERO_TOKEN_URL.to_string()).map_err(invalid)?);

        Ok(match key_pair.1 {
            Some(secret) => client.set_client_secret(secret),
            None => client,
        })
    }

    fn build(config: Config, access_token: AccessToken, refresh_token: Option<RefreshToken>) -> Result<Self> {
        let base_url = config.validate()?;
        Ok(Self {
            config,
            base_url,
            access_token,
            refresh_token,
            http: reqwest::Client::new(),
            rate_limit_info: Arc::default(),
        })
    }

    /// Wraps an access token obtained elsewhere.
    #[instrument(skip(access_token))]
    pub fn with_access_token(config: Config, access_token: impl Into<String>) -> Result<Self> {
        Self::build(config, AccessToken::new(access_token.into()), None)
    }

    /// Authenticates with the client credentials grant (custom connections).
    #[instrument(skip(scopes))]
    pub async fn from_client_credentials(config: Config, scopes: impl Into<Scope>) -> Result<Self> {
        if !config.key_pair.has_secret() {
            let mut diagnostics = config.diagnostics();
            diagnostics.push("client secret is required for the client credentials grant".to_string());
            error!(?diagnostics, "invalid Xero configuration");
            return Err(Error::InvalidConfiguration { diagnostics });
        }
        config.validate()?;

        let scope = scopes.into();
        let oauth_client = Self::build_oauth_client(config.key_pair.clone())?;
        let http_client = reqwest::Client::new();

        let mut request = oauth_client.exchange_client_credentials();
        if !scope.is_empty() {
            request = request.add_scope(scope.into_oauth2());
        }
        let token = request.request_async(&http_client).await?;
        debug!("obtained client credentials token");

        Self::build(config, token.access_token().clone(), token.refresh_token().cloned())
    }

    /// Generates an authorization URL to use for the code flow authorization method.
    #[instrument(skip(scopes))]
    pub fn authorize_url(
        key_pair: KeyPair,
        redirect_url: Url,
        scopes: impl Into<Scope>,
    ) -> Result<(Url, CsrfToken)> {
        let scope = scopes.into();
        Ok(Self::build_oauth_client(key_pair)?
            .set_redirect_uri(oauth2::RedirectUrl::from_url(redirect_url))
            .authorize_url(CsrfToken::new_random)
            .add_scope(scope.into_oauth2())
            .url())
    }

    /// Creates an authorized client from a code generated in the code flow authorization method.
    #[instrument(skip(code))]
    pub async fn from_authorization_code(config: Config, redirect_url: Url, code: String) -> Result<Self> {
        config.validate()?;
        let oauth_client = Self::build_oauth_client(config.key_pair.clone())?;
        let http_client = reqwest::Client::new();

        let token = oauth_client
            .exchange_code(AuthorizationCode::new(code))
            .set_redirect_uri(Cow::Owned(oauth2::RedirectUrl::from_url(redirect_url)))
            .request_async(&http_client)
            .await?;

        Self::build(config, token.access_token().clone(), token.refresh_token().cloned())
    }

    /// Refreshes the access token using the refresh token, if there is one.
    pub async fn refresh_access_token(&mut self) -> Result<()> {
        let Some(refresh_token) = &self.refresh_token else {
            return Ok(());
        };
        let oauth_client = Self::build_oauth_client(self.config.key_pair.clone())?;
        let token = oauth_client
            .exchange_refresh_token(refresh_token)
            .request_async(&self.http)
            .await?;

        self.access_token = token.access_token().clone();
        if let Some(new_refresh_token) = token.refresh_token() {
            self.refresh_token = Some(new_refresh_token.clone());
        }
        Ok(())
    }

    /// Sets the tenant ID for this client.
    pub fn set_tenant(&mut self, tenant_id: Option<Uuid>) {
        trace!(?tenant_id, "updating tenant id");
        self.config.tenant_id = tenant_id;
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rate limit headers of the latest response.
    #[must_use]
    pub fn rate_limit_info(&self) -> RateLimitInfo {
        self.rate_limit_info
            .lock()
            .map(|info| *info)
            .unwrap_or_default()
    }

    fn record_rate_limits(&self, headers: &header::HeaderMap) {
        let info = RateLimitInfo::from_response_headers(headers);
        info.log_if_near_limit();
        if let Ok(mut latest) = self.rate_limit_info.lock() {
            *latest = info;
        }
    }
}

impl RemoteService for Client {
    fn format(&self) -> Format {
        self.config.format
    }

    fn url(&self, entity_path: &str, section: ApiSection) -> Result<String> {
        section.url(&self.base_url, entity_path).map(Into::into)
    }

    #[instrument(skip(self, params, body))]
    async fn request(
        &self,
        method: Method,
        url: &str,
        params: &[(String, String)],
        body: Option<&str>,
        format: Format,
    ) -> Result<RemoteResponse> {
        let (headers, query): (Vec<_>, Vec<_>) =
            params.iter().partition(|(key, _)| key == IF_MODIFIED_SINCE);

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(self.access_token.secret())
            .header(header::ACCEPT, format.mime())
            .query(&query);

        if let Some(tenant_id) = self.config.tenant_id {
            request = request.header("Xero-tenant-id", tenant_id.to_string());
        }
        for (_, since) in headers {
            request = request.header(header::IF_MODIFIED_SINCE, since);
        }
        if let Some(body) = body {
            trace!(body, "request body");
            request = request
                .header(header::CONTENT_TYPE, Format::Xml.mime())
                .body(body.to_string());
        }

        let response = request.send().await?;
        let code = response.status().as_u16();
        self.record_rate_limits(response.headers());

        let body = response.text().await?;
        debug!(code, "received response");
        trace!(body, "response body");

        Ok(RemoteResponse::new(code, body, format))
    }

    fn diagnostics(&self) -> Vec<String> {
        self.config.diagnostics()
    }
}
