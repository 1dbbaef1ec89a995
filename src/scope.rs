use oauth2::Scope as OAuth2Scope;
use std::fmt;
use std::str::FromStr;

/// Represents permission level for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ReadWrite,
    ReadOnly,
}

/// The accounting scopes the models in this crate need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeType {
    AccountingTransactions(Permission),
    AccountingReports,
    AccountingJournals,
    AccountingSettings(Permission),
    AccountingContacts(Permission),
    AccountingAttachments(Permission),
    PayrollEmployees(Permission),
}

impl ScopeType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountingTransactions(Permission::ReadWrite) => "accounting.transactions",
            Self::AccountingTransactions(Permission::ReadOnly) => "accounting.transactions.read",
            Self::AccountingReports => "accounting.reports.read",
            Self::AccountingJournals => "accounting.journals.read",
            Self::AccountingSettings(Permission::ReadWrite) => "accounting.settings",
            Self::AccountingSettings(Permission::ReadOnly) => "accounting.settings.read",
            Self::AccountingContacts(Permission::ReadWrite) => "accounting.contacts",
            Self::AccountingContacts(Permission::ReadOnly) => "accounting.contacts.read",
            Self::AccountingAttachments(Permission::ReadWrite) => "accounting.attachments",
            Self::AccountingAttachments(Permission::ReadOnly) => "accounting.attachments.read",
            Self::PayrollEmployees(Permission::ReadWrite) => "payroll.employees",
            Self::PayrollEmployees(Permission::ReadOnly) => "payroll.employees.read",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a scope from a string
#[derive(Debug, Clone)]
pub struct ParseScopeError(String);

impl fmt::Display for ParseScopeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid scope string: {}", self.0)
    }
}

impl std::error::Error for ParseScopeError {}

impl FromStr for ScopeType {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::AccountingTransactions(Permission::ReadWrite),
            Self::AccountingTransactions(Permission::ReadOnly),
            Self::AccountingReports,
            Self::AccountingJournals,
            Self::AccountingSettings(Permission::ReadWrite),
            Self::AccountingSettings(Permission::ReadOnly),
            Self::AccountingContacts(Permission::ReadWrite),
            Self::AccountingContacts(Permission::ReadOnly),
            Self::AccountingAttachments(Permission::ReadWrite),
            Self::AccountingAttachments(Permission::ReadOnly),
            Self::PayrollEmployees(Permission::ReadWrite),
            Self::PayrollEmployees(Permission::ReadOnly),
        ]
        .into_iter()
        .find(|scope| scope.as_str() == s)
        .ok_or_else(|| ParseScopeError(s.to_string()))
    }
}

/// A space separated set of Xero API scopes requested during authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    scopes: Vec<ScopeType>,
}

impl Scope {
    #[must_use]
    pub fn new(scopes: Vec<ScopeType>) -> Self {
        Self { scopes }
    }

    /// Everything the entity models read and write.
    #[must_use]
    pub fn all_accounting() -> Self {
        Self::new(vec![
            ScopeType::AccountingTransactions(Permission::ReadWrite),
            ScopeType::AccountingReports,
            ScopeType::AccountingJournals,
            ScopeType::AccountingSettings(Permission::ReadWrite),
            ScopeType::AccountingContacts(Permission::ReadWrite),
        ])
    }

    /// Read-only access to transactions, reports and contacts.
    #[must_use]
    pub fn accounting_read() -> Self {
        Self::new(vec![
            ScopeType::AccountingTransactions(Permission::ReadOnly),
            ScopeType::AccountingReports,
            ScopeType::AccountingContacts(Permission::ReadOnly),
            ScopeType::AccountingSettings(Permission::ReadOnly),
        ])
    }

    #[must_use]
    pub fn with(mut self, scope: ScopeType) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    #[must_use]
    pub fn into_oauth2(self) -> OAuth2Scope {
        OAuth2Scope::new(self.to_string())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .scopes
            .iter()
            .map(|scope| scope.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&joined)
    }
}

impl From<ScopeType> for Scope {
    fn from(scope: ScopeType) -> Self {
        Self::new(vec![scope])
    }
}

impl FromStr for Scope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(ScopeType::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}
