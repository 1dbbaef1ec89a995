use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::model::{EntityKind, Model};

use super::{HasLines, line_item::LineAmountType, parse_date, parse_enum, related};

pub static KIND: EntityKind = EntityKind::collection(
    "BankTransactions",
    "BankTransaction",
    "BankTransactionID",
    &[
        "Type",
        "Date",
        "Reference",
        "LineAmountTypes",
        "IsReconciled",
        "CurrencyCode",
        "CurrencyRate",
        "Url",
        "SubTotal",
        "TotalTax",
        "Total",
        "PrepaymentID",
        "OverpaymentID",
        "HasAttachments",
        "UpdatedDateUTC",
    ],
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Type {
    Receive,
    #[serde(rename = "RECEIVE-OVERPAYMENT")]
    ReceiveOverpayment,
    #[serde(rename = "RECEIVE-PREPAYMENT")]
    ReceivePrepayment,
    Spend,
    #[serde(rename = "SPEND-OVERPAYMENT")]
    SpendOverpayment,
    #[serde(rename = "SPEND-PREPAYMENT")]
    SpendPrepayment,
    #[serde(rename = "RECEIVE-TRANSFER")]
    ReceiveTransfer,
    #[serde(rename = "SPEND-TRANSFER")]
    SpendTransfer,
}

entity! {
    /// Money received or spent through a bank account.
    BankTransaction => KIND
}

impl HasLines for BankTransaction {
    const LINES: &'static EntityKind = &super::line_item::KIND;
}

impl BankTransaction {
    #[must_use]
    pub fn transaction_type(&self) -> Option<Type> {
        parse_enum(self, "Type")
    }

    #[must_use]
    pub fn line_amount_types(&self) -> Option<LineAmountType> {
        parse_enum(self, "LineAmountTypes")
    }

    #[must_use]
    pub fn date(&self) -> Option<Date> {
        parse_date(self, "Date")
    }

    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.decimal("Total")
    }

    #[must_use]
    pub fn contact(&self) -> Option<&Model> {
        related(self, "Contact")
    }

    /// The bank account the money moved through, as the raw `{AccountID, Code, ...}` map.
    #[must_use]
    pub fn bank_account(&self) -> Option<&serde_json::Value> {
        self.attribute("BankAccount")
    }
}
