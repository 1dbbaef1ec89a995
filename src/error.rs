use std::fmt;

use miette::Diagnostic;
use oauth2::HttpClientError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2ErrorResponse {}

impl oauth2::ErrorResponse for OAuth2ErrorResponse {}

impl fmt::Display for OAuth2ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OAuth2 error occurred")
    }
}

/// Errors that can occur when working with Xero models.
///
/// A `404 Not Found` from the API is not an error: finders return
/// `Ok(None)` and mutations return `Ok(false)` instead.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {0:?}")]
    #[diagnostic(
        code(xero_models::request_error),
        help("Check your network connection and Xero API availability")
    )]
    Request(#[source] reqwest::Error),

    /// An error returned during `OAuth2` operations
    #[error("oauth2 error: {0:?}")]
    #[diagnostic(
        code(xero_models::oauth2_error),
        help("Verify your OAuth2 configuration and credentials")
    )]
    OAuth2(oauth2::RequestTokenError<HttpClientError<reqwest::Error>, OAuth2ErrorResponse>),

    /// The configuration failed its diagnostics before any request was made.
    #[error("there are errors with your Xero configuration: {}", .diagnostics.join("; "))]
    #[diagnostic(
        code(xero_models::invalid_configuration),
        help("Check XERO_CLIENT_ID, XERO_CLIENT_SECRET and XERO_BASE_URL")
    )]
    InvalidConfiguration { diagnostics: Vec<String> },

    /// Any response other than `200 OK` or `404 Not Found`.
    #[error("error from Xero ({status_code}) at {url}: {response_body}")]
    #[diagnostic(
        code(xero_models::remote_service),
        help("Inspect the response body returned by the Xero API")
    )]
    RemoteService {
        status_code: u16,
        url: String,
        response_body: String,
    },

    #[error("the {field} attribute is required to {operation} a {entity}")]
    #[diagnostic(
        code(xero_models::missing_identifier),
        help("Load the {entity} from Xero or call `set_id` before this operation")
    )]
    MissingIdentifier {
        entity: &'static str,
        field: &'static str,
        operation: &'static str,
    },

    #[error("cannot add a {found} to a collection of {expected}")]
    #[diagnostic(
        code(xero_models::kind_mismatch),
        help("Collections only hold entities of a single kind")
    )]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid markup: {0}")]
    #[diagnostic(
        code(xero_models::markup),
        help("The API returned XML in an unexpected shape")
    )]
    Markup(String),

    #[error("error decoding response: {0:?}")]
    #[diagnostic(
        code(xero_models::deserialization_error),
        help("The API returned data in an unexpected format")
    )]
    DeserializationError(#[source] serde_json::Error, Option<String>),

    #[error("endpoint could not be parsed as a URL")]
    #[diagnostic(
        code(xero_models::invalid_endpoint),
        help("Check that the API base URL is correctly formatted")
    )]
    InvalidEndpoint,

    #[error("could not interpret {0:?} as a date")]
    #[diagnostic(
        code(xero_models::invalid_date),
        help("Use RFC 3339, RFC 2822 or YYYY-MM-DD formatted dates")
    )]
    InvalidDate(String),
}

impl Error {
    /// The HTTP status code attached to this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteService { status_code, .. } => Some(*status_code),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::DeserializationError(e, None)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::Markup(e.to_string())
    }
}

impl From<oauth2::RequestTokenError<HttpClientError<reqwest::Error>, OAuth2ErrorResponse>>
    for Error
{
    fn from(
        e: oauth2::RequestTokenError<HttpClientError<reqwest::Error>, OAuth2ErrorResponse>,
    ) -> Self {
        Self::OAuth2(e)
    }
}

/// Type alias for results from this crate.
///
/// This is already a Miette diagnostic result due to the implementation of
/// the Diagnostic trait for the Error type.
pub type Result<O> = std::result::Result<O, Error>;
