use std::fmt;
use url::Url;

use crate::error::{Error, Result};

pub const BASE_URL: &str = "https://api.xero.com/";

/// The section of the Xero API an entity lives under.
///
/// Each section has its own versioned path prefix below the base URL, so the
/// same entity path (`Invoices`, `Reports/BankStatement`, ...) resolves to a
/// different URL depending on the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiSection {
    #[default]
    Core,
    Payroll,
}

impl ApiSection {
    /// The versioned path prefix of this section, always with a trailing slash.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Core => "api.xro/2.0/",
            Self::Payroll => "payroll.xro/1.0/",
        }
    }

    /// Joins `entity_path` onto `base` below this section's prefix.
    pub fn url(self, base: &Url, entity_path: &str) -> Result<Url> {
        base.join(self.prefix())
            .and_then(|section| section.join(entity_path.trim_start_matches('/')))
            .map_err(|_| Error::InvalidEndpoint)
    }
}

impl fmt::Display for ApiSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Payroll => write!(f, "payroll"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_urls_sit_below_the_accounting_prefix() {
        let base = Url::parse(BASE_URL).unwrap();
        let url = ApiSection::Core.url(&base, "Invoices").unwrap();
        assert_eq!(url.as_str(), "https://api.xero.com/api.xro/2.0/Invoices");

        let url = ApiSection::Core.url(&base, "Reports/BankStatement").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.xero.com/api.xro/2.0/Reports/BankStatement"
        );
    }

    #[test]
    fn payroll_urls_use_their_own_prefix() {
        let base = Url::parse(BASE_URL).unwrap();
        let url = ApiSection::Payroll.url(&base, "/Employees").unwrap();
        assert_eq!(url.as_str(), "https://api.xero.com/payroll.xro/1.0/Employees");
    }
}
