use std::{fmt, str::FromStr};

pub use reqwest::Method;
use serde_json::Value;

use crate::{endpoints::ApiSection, error::Result, markup};

/// The wire format of a request or response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Xml,
    Json,
}

impl Format {
    /// The media type sent in `Accept` (and `Content-Type` for bodies).
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Xml => "application/xml",
            Self::Json => "application/json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => write!(f, "xml"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported format {other:?}, expected xml or json")),
        }
    }
}

/// The raw outcome of one exchange with the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub code: u16,
    pub body: String,
    pub format: Format,
}

impl RemoteResponse {
    #[must_use]
    pub fn new(code: u16, body: impl Into<String>, format: Format) -> Self {
        Self {
            code,
            body: body.into(),
            format,
        }
    }
}

/// The collaborator that models talk to.
///
/// Authentication, signing and transport all live behind this trait; models only
/// ever build a verb, a URL, query parameters and an optional markup body, and
/// interpret the status code of what comes back. [`Client`](crate::Client) is the
/// HTTP implementation.
pub trait RemoteService {
    /// The format requested when the caller does not ask for one.
    fn format(&self) -> Format {
        Format::Xml
    }

    /// Resolves an entity path such as `Invoices` or `Reports/BankStatement` to a full URL.
    fn url(&self, entity_path: &str, section: ApiSection) -> Result<String>;

    /// Performs one exchange. Non-success status codes are *not* errors at this level.
    async fn request(
        &self,
        method: Method,
        url: &str,
        params: &[(String, String)],
        body: Option<&str>,
        format: Format,
    ) -> Result<RemoteResponse>;

    /// Parses a response body into the canonical nested map.
    fn parse_response(&self, body: &str, format: Format) -> Result<Value> {
        markup::parse(body, format)
    }

    /// Problems with the collaborator's configuration. Empty means usable.
    fn diagnostics(&self) -> Vec<String> {
        Vec::new()
    }
}
