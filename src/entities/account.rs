use serde::{Deserialize, Serialize};

use crate::model::EntityKind;

use super::parse_enum;

pub static KIND: EntityKind = EntityKind::collection(
    "Accounts",
    "Account",
    "AccountID",
    &[
        "Code",
        "Name",
        "Type",
        "BankAccountNumber",
        "BankAccountType",
        "CurrencyCode",
        "Description",
        "TaxType",
        "EnablePaymentsToAccount",
        "ShowInExpenseClaims",
        "Class",
        "SystemAccount",
        "ReportingCode",
        "ReportingCodeName",
        "HasAttachments",
        "AddToWatchlist",
        "UpdatedDateUTC",
    ],
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Bank,
    Current,
    #[serde(rename = "CURRLIAB")]
    CurrentLiability,
    #[serde(rename = "DEPRECIATN")]
    Depreciation,
    #[serde(rename = "DIRECTCOSTS")]
    DirectCosts,
    Equity,
    Expense,
    Fixed,
    Inventory,
    Liability,
    #[serde(rename = "NONCURRENT")]
    NonCurrent,
    #[serde(rename = "OTHERINCOME")]
    OtherIncome,
    Overheads,
    Prepayment,
    Revenue,
    Sales,
    #[serde(rename = "TERMLIAB")]
    TermLiability,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountClass {
    Asset,
    Equity,
    Expense,
    Liability,
    Revenue,
}

entity! {
    /// An account in the chart of accounts.
    Account => KIND
}

impl Account {
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.str("Code")
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str("Name")
    }

    #[must_use]
    pub fn account_type(&self) -> Option<AccountType> {
        parse_enum(self, "Type")
    }

    #[must_use]
    pub fn class(&self) -> Option<AccountClass> {
        parse_enum(self, "Class")
    }
}
