use url::Url;
use uuid::Uuid;

use crate::{
    endpoints::BASE_URL,
    error::{Error, Result},
    oauth::KeyPair,
    service::Format,
};

/// Everything a [`Client`](crate::Client) needs before its first request.
#[derive(Debug, Clone)]
pub struct Config {
    pub key_pair: KeyPair,
    pub base_url: String,
    pub format: Format,
    pub tenant_id: Option<Uuid>,
}

impl Config {
    #[must_use]
    pub fn new(key_pair: KeyPair) -> Self {
        Self {
            key_pair,
            base_url: BASE_URL.to_string(),
            format: Format::default(),
            tenant_id: None,
        }
    }

    /// Reads `XERO_CLIENT_ID`, `XERO_CLIENT_SECRET` and the optional
    /// `XERO_BASE_URL`, `XERO_FORMAT` and `XERO_TENANT_ID`.
    ///
    /// Only values that cannot be parsed fail here; missing credentials show up in
    /// [`Config::diagnostics`].
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(KeyPair::from_env());

        if let Ok(base_url) = std::env::var("XERO_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(format) = std::env::var("XERO_FORMAT") {
            config.format = format.parse().map_err(|diagnostic| Error::InvalidConfiguration {
                diagnostics: vec![diagnostic],
            })?;
        }
        if let Ok(tenant_id) = std::env::var("XERO_TENANT_ID") {
            let tenant_id = Uuid::parse_str(tenant_id.trim()).map_err(|e| {
                Error::InvalidConfiguration {
                    diagnostics: vec![format!("XERO_TENANT_ID is not a UUID: {e}")],
                }
            })?;
            config.tenant_id = Some(tenant_id);
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Every problem with this configuration. Empty means usable.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        let mut diagnostics = Vec::new();

        if self.key_pair.client_id().trim().is_empty() {
            diagnostics.push("client id is empty".to_string());
        }

        match Url::parse(&self.base_url) {
            Ok(url) if url.cannot_be_a_base() => {
                diagnostics.push(format!("base url {} cannot be a base", self.base_url));
            }
            Ok(url) if url.scheme() != "https" && !is_loopback(&url) => {
                diagnostics.push(format!("base url {} must use https", self.base_url));
            }
            Ok(_) => {}
            Err(e) => diagnostics.push(format!("base url {} is invalid: {e}", self.base_url)),
        }

        diagnostics
    }

    /// The base URL, or [`Error::InvalidConfiguration`] with every diagnostic.
    pub(crate) fn validate(&self) -> Result<Url> {
        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            error!(?diagnostics, "invalid Xero configuration");
            return Err(Error::InvalidConfiguration { diagnostics });
        }
        Url::parse(&self.base_url).map_err(|e| Error::InvalidConfiguration {
            diagnostics: vec![e.to_string()],
        })
    }
}

// Local mock servers are plain http.
fn is_loopback(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_xero() {
        let config = Config::new(KeyPair::new("id".into(), Some("secret".into())));
        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.format, Format::Xml);
        assert!(config.diagnostics().is_empty());
    }

    #[test]
    fn every_problem_is_reported() {
        let config = Config::new(KeyPair::new(String::new(), None)).with_base_url("http://xero.example");
        assert_eq!(
            config.diagnostics(),
            vec![
                "client id is empty".to_string(),
                "base url http://xero.example must use https".to_string(),
            ]
        );
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { diagnostics }) if diagnostics.len() == 2
        ));

        let config = Config::new(KeyPair::new("id".into(), None)).with_base_url("not a url");
        assert_eq!(config.diagnostics().len(), 1);
        assert!(Config::new(KeyPair::new("id".into(), None))
            .with_base_url("http://localhost:8080/")
            .diagnostics()
            .is_empty());
    }
}
