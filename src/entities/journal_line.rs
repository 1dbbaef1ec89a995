use rust_decimal::Decimal;
use serde_json::Value;

use crate::model::EntityKind;

use super::{Entity, line_item::format_amount};

pub static KIND: EntityKind = EntityKind::collection(
    "JournalLines",
    "JournalLine",
    "JournalLineID",
    &[
        "LineAmount",
        "AccountCode",
        "AccountID",
        "AccountType",
        "AccountName",
        "Description",
        "TaxType",
        "TaxName",
        "TaxAmount",
        "NetAmount",
        "GrossAmount",
        "Tracking",
        "TrackingCategories",
        "IsBlank",
    ],
);

entity! {
    /// A debit or credit line of a manual journal, or of a journal read back from the ledger.
    JournalLine => KIND
}

/// Builds a journal line; the explicit arguments override the same keys in `fields`.
#[must_use]
pub fn make(description: &str, amount: Decimal, account_code: &str, fields: Value) -> JournalLine {
    let mut line = JournalLine::new();
    if let Value::Object(fields) = fields {
        for (key, value) in fields {
            line.set_attribute(key, value);
        }
    }
    line.set_attribute("Description", description);
    line.set_attribute("LineAmount", format_amount(amount));
    line.set_attribute("AccountCode", account_code);
    line
}

impl JournalLine {
    #[must_use]
    pub fn line_amount(&self) -> Option<Decimal> {
        self.decimal("LineAmount")
    }

    #[must_use]
    pub fn account_code(&self) -> Option<&str> {
        self.str("AccountCode")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.str("Description")
    }
}
